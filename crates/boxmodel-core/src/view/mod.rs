//! Property models of the visual primitives a toolkit backend renders.

mod button;
mod cache;
mod frame;
mod input;
mod list;
mod panel;

pub use button::{Animation, Easing, SPEED_BUSY, SPEED_IDLE, SettingsButton};
pub use cache::{CacheKey, DEFAULT_LIMIT, RenderCache};
pub use frame::{Margins, WindowFrame};
pub use input::InputLine;
pub use list::{ActionItemStyle, ItemStyle, ListModel, ListView, ResultItemStyle};
pub use panel::Panel;
