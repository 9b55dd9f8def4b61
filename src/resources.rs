use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Result;
use log::trace;

/// Opaque integer identifier for a string or image resource.
pub type ResId = i32;

/// Maps resource identifiers to concrete strings and images.
///
/// Lookups are synchronous and may fail for unknown identifiers. Callers are
/// expected to propagate those failures rather than substitute defaults.
pub trait Resources {
    type Image;

    fn string(&self, id: ResId) -> Result<String>;
    fn image(&self, id: ResId) -> Result<Self::Image>;
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    #[error("unknown string resource {0}")]
    UnknownString(ResId),
    #[error("unknown image resource {0}")]
    UnknownImage(ResId),
}

/// Path-backed image handle. Loading pixels is left to whatever draws the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    path: PathBuf,
}

impl Icon {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Default, Clone)]
pub struct ResourceTable {
    strings: HashMap<ResId, String>,
    icons: HashMap<ResId, Icon>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_string(&mut self, id: ResId, value: impl Into<String>) -> &mut Self {
        self.strings.insert(id, value.into());
        self
    }

    pub fn insert_icon(&mut self, id: ResId, icon: Icon) -> &mut Self {
        self.icons.insert(id, icon);
        self
    }

    pub fn len(&self) -> usize {
        self.strings.len() + self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty() && self.icons.is_empty()
    }
}

impl Resources for ResourceTable {
    type Image = Icon;

    fn string(&self, id: ResId) -> Result<String> {
        trace!("resolve string {id}");
        let value = self
            .strings
            .get(&id)
            .ok_or(ResourceError::UnknownString(id))?;
        Ok(value.clone())
    }

    fn image(&self, id: ResId) -> Result<Icon> {
        trace!("resolve image {id}");
        let icon = self.icons.get(&id).ok_or(ResourceError::UnknownImage(id))?;
        Ok(icon.clone())
    }
}
