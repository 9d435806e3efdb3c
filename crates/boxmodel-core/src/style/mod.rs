//! Style definition files and the values they resolve to.

mod brush;
mod color;
mod entries;
mod fields;
pub mod ini;
mod palette;
mod reader;
mod registry;
mod resolve;

pub use brush::{Brush, GradientStop, LinearGradient};
pub use color::Color;
pub use entries::RawEntries;
pub use fields::{FieldMut, PALETTE_PREFIX, Style, palette_entries};
pub use palette::{CoreRoles, Palette, Shades};
pub use reader::{LoadedStyle, StyleReader};
pub use registry::StyleRegistry;
pub use resolve::Resolver;
