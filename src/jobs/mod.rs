pub mod format;
pub mod interaction;
pub mod menu;
pub mod types;
