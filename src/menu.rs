pub mod item;
pub mod model;

pub use item::ActionItem;
pub use model::{Activation, QuickActionMenu};
