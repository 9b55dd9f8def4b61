use std::{collections::HashMap, env, fs, path::Path, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::Deserialize;

use crate::menu::{ActionItem, QuickActionMenu};
use crate::resources::{Icon, ResId, ResourceTable};

/// Menu definition file: a resource table plus the entries that draw on it.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub strings: HashMap<ResId, String>,

    /// Icon resource id -> image path.
    #[serde(default)]
    pub icons: HashMap<ResId, PathBuf>,

    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub action_id: i32,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub title_res: Option<ResId>,

    #[serde(default)]
    pub icon: Option<PathBuf>,

    #[serde(default)]
    pub icon_res: Option<ResId>,

    #[serde(default)]
    pub sticky: bool,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("item {0}: exactly one of `title` or `title_res` is required")]
    Title(i32),
    #[error("item {0}: `icon` and `icon_res` are mutually exclusive")]
    Icon(i32),
}

/// Loads the menu definition. An explicit path must exist; a resolved one may
/// be missing, which yields `None`.
pub fn load_optional(explicit: Option<&Path>) -> Result<Option<MenuConfig>> {
    if let Some(path) = explicit {
        return load_from(path).map(Some);
    }
    let Some(path) = resolve_config_path(None) else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_from(&path).map(Some)
}

pub fn load_from(path: &Path) -> Result<MenuConfig> {
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: MenuConfig =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    debug!(
        "loaded {} ({} items, {} strings, {} icons)",
        path.display(),
        cfg.items.len(),
        cfg.strings.len(),
        cfg.icons.len()
    );
    Ok(cfg)
}

/// Where a menu definition may live, highest priority first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    /// `--config` or `QUICKACTION_CONFIG`; used as-is, existing or not.
    pub pinned: Option<PathBuf>,
    pub local: PathBuf,
    pub user: Option<PathBuf>,
}

impl SearchPaths {
    pub fn from_env(explicit: Option<&Path>) -> Self {
        let pinned = explicit.map(Path::to_path_buf).or_else(|| {
            env::var("QUICKACTION_CONFIG")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
        });
        let user = env::var_os("APPDATA")
            .map(|appdata| PathBuf::from(appdata).join("quickaction"))
            .or_else(|| {
                env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("quickaction"))
            })
            .map(|dir| dir.join("menu.json"));

        Self {
            pinned,
            local: PathBuf::from("quickaction.json"),
            user,
        }
    }

    /// Pinned path, else the local file if present, else the per-user file.
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(pinned) = &self.pinned {
            return Some(pinned.clone());
        }
        if self.local.exists() {
            return Some(self.local.clone());
        }
        self.user.clone()
    }
}

pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    SearchPaths::from_env(explicit).resolve()
}

/// Writes a starter menu definition to `path` unless one is already there.
pub fn ensure_config_file_exists(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }

    if !path.exists() {
        let template = serde_json::json!({
            "strings": { "1": "Add", "2": "Accept" },
            "icons": {},
            "items": [
                { "action_id": 1, "title_res": 1 },
                { "action_id": 2, "title_res": 2, "sticky": true }
            ]
        });
        let mut s = serde_json::to_string_pretty(&template).context("serialize config template")?;
        s.push('\n');
        fs::write(path, s.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    }

    Ok(())
}

pub fn default_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_config_path(explicit).ok_or_else(|| {
        anyhow!("No config path available (set QUICKACTION_CONFIG or ensure APPDATA/HOME is present)")
    })
}

pub fn resource_table(cfg: &MenuConfig) -> ResourceTable {
    let mut table = ResourceTable::new();
    for (id, s) in &cfg.strings {
        table.insert_string(*id, s.as_str());
    }
    for (id, path) in &cfg.icons {
        table.insert_icon(*id, Icon::new(path));
    }
    table
}

pub fn build_item(item: &ItemConfig, res: &ResourceTable) -> Result<ActionItem> {
    let id = item.action_id;
    if item.icon.is_some() && item.icon_res.is_some() {
        return Err(ConfigError::Icon(id).into());
    }
    let icon = item.icon.as_ref().map(Icon::new);

    let built = match (item.title.as_deref(), item.title_res, icon, item.icon_res) {
        (Some(title), None, None, None) => ActionItem::new(id, title),
        (Some(title), None, Some(icon), None) => ActionItem::with_icon(id, title, icon),
        (Some(title), None, None, Some(icon_res)) => {
            ActionItem::from_resource_icon(res, id, title, icon_res)?
        }
        (None, Some(title_res), None, None) => ActionItem::from_resource_title(res, id, title_res)?,
        (None, Some(title_res), None, Some(icon_res)) => {
            ActionItem::from_resource_both(res, id, title_res, icon_res)?
        }
        (None, Some(title_res), Some(icon), None) => {
            ActionItem::from_resource_title_with_icon(res, id, title_res, icon)?
        }
        _ => return Err(ConfigError::Title(id).into()),
    };

    Ok(built.sticky(item.sticky))
}

pub fn build_menu(cfg: &MenuConfig) -> Result<QuickActionMenu> {
    let res = resource_table(cfg);
    let mut menu = QuickActionMenu::new();
    for (pos, item) in cfg.items.iter().enumerate() {
        let built = build_item(item, &res).with_context(|| format!("menu item #{pos}"))?;
        menu.add(built);
    }
    Ok(menu)
}
