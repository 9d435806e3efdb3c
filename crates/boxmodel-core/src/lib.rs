pub mod config;
pub mod controller;
pub mod history;
pub mod keys;
pub mod placement;
pub mod query;
pub mod statemachine;
pub mod style;
pub mod styles_query;
pub mod view;
pub mod watcher;

mod error;

#[cfg(test)]
mod tests;

pub use controller::{Environment, WindowController};
pub use error::{Error, Result, ValueKind};
