pub mod config;
pub mod menu;
pub mod resources;
