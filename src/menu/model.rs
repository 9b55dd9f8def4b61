use std::fmt;

use anyhow::{anyhow, Result};
use log::debug;

use crate::menu::item::ActionItem;
use crate::resources::Icon;

/// Outcome of activating one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub pos: usize,
    pub action_id: i32,
    /// False when the entry is sticky and the popup stays up.
    pub dismiss: bool,
}

type ActionListener = Box<dyn FnMut(&Activation)>;
type DismissListener = Box<dyn FnMut()>;

/// Headless quick action popup: an ordered list of entries plus the
/// selection/dismiss bookkeeping a renderer would otherwise do.
pub struct QuickActionMenu<I = Icon> {
    items: Vec<ActionItem<I>>,
    dismissed: bool,
    on_action: Option<ActionListener>,
    on_dismiss: Option<DismissListener>,
}

impl<I: fmt::Debug> fmt::Debug for QuickActionMenu<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickActionMenu")
            .field("items", &self.items)
            .field("dismissed", &self.dismissed)
            .field("on_action", &self.on_action.is_some())
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

impl<I> Default for QuickActionMenu<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            dismissed: false,
            on_action: None,
            on_dismiss: None,
        }
    }
}

impl<I> QuickActionMenu<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` and returns its position.
    pub fn add(&mut self, item: ActionItem<I>) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn items(&self) -> &[ActionItem<I>] {
        &self.items
    }

    pub fn item(&self, pos: usize) -> Option<&ActionItem<I>> {
        self.items.get(pos)
    }

    pub fn item_mut(&mut self, pos: usize) -> Option<&mut ActionItem<I>> {
        self.items.get_mut(pos)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First entry carrying `action_id`. Ids are not required to be unique.
    pub fn find(&self, action_id: i32) -> Option<(usize, &ActionItem<I>)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, item)| item.action_id() == action_id)
    }

    pub fn on_action(&mut self, listener: impl FnMut(&Activation) + 'static) {
        self.on_action = Some(Box::new(listener));
    }

    pub fn on_dismiss(&mut self, listener: impl FnMut() + 'static) {
        self.on_dismiss = Some(Box::new(listener));
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Reopens the popup with nothing selected.
    pub fn show(&mut self) {
        self.dismissed = false;
        self.clear_selection();
    }

    pub fn clear_selection(&mut self) {
        for item in &mut self.items {
            item.set_selected(false);
        }
    }

    pub fn activate(&mut self, pos: usize) -> Result<Activation> {
        if self.dismissed {
            return Err(anyhow!("menu is dismissed"));
        }
        let len = self.items.len();
        if pos >= len {
            return Err(anyhow!("no menu entry at position {pos} (menu has {len})"));
        }
        // One highlighted row at a time, sticky or not.
        self.clear_selection();
        let item = &mut self.items[pos];
        item.set_selected(true);
        let activation = Activation {
            pos,
            action_id: item.action_id(),
            dismiss: !item.is_sticky(),
        };
        debug!(
            "activated entry {pos} (action {}, dismiss={})",
            activation.action_id, activation.dismiss
        );

        if let Some(listener) = self.on_action.as_mut() {
            listener(&activation);
        }

        if activation.dismiss {
            self.dismissed = true;
            debug!("menu dismissed");
            if let Some(listener) = self.on_dismiss.as_mut() {
                listener();
            }
        }

        Ok(activation)
    }
}
