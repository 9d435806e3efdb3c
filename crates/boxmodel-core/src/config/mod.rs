mod dirs;
mod preferences;
mod store;

pub use dirs::{DataLocations, Directories, style_directories};
pub use preferences::{Preferences, keys};
pub use store::{JsonStore, MemoryStore, SettingsExt, SettingsStore};
