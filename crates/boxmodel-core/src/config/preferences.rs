use super::store::{SettingsExt, SettingsStore};
use crate::keys::Modifier;
use crate::style::StyleRegistry;
use tracing::warn;

/// Store keys of every persisted preference.
pub mod keys {
    pub const ALWAYS_ON_TOP: &str = "alwaysOnTop";
    pub const CLEAR_ON_HIDE: &str = "clearOnHide";
    pub const DISPLAY_SCROLLBAR: &str = "displayScrollbar";
    pub const FOLLOW_CURSOR: &str = "followCursor";
    pub const HIDE_ON_FOCUS_LOSS: &str = "hideOnFocusLoss";
    pub const HISTORY_SEARCH: &str = "historySearch";
    pub const MAX_RESULTS: &str = "itemCount";
    pub const SHOW_CENTERED: &str = "showCentered";
    pub const DISABLE_INPUT_METHOD: &str = "disable_input_method";
    pub const DEBUG: &str = "debug";
    pub const STYLE_LIGHT: &str = "lightStyle";
    pub const STYLE_DARK: &str = "darkStyle";
    pub const ACTIONS_MODIFIER: &str = "actionsModifier";
    pub const FALLBACKS_MODIFIER: &str = "fallbacksModifier";
    pub const COMMAND_MODIFIER: &str = "commandModifier";

    /// Lives in the state store, not the settings store.
    pub const WINDOW_POSITION: &str = "windowPosition";
}

/// User preferences with their built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Preferences {
    pub always_on_top: bool,
    pub clear_on_hide: bool,
    pub display_scrollbar: bool,
    pub follow_cursor: bool,
    pub hide_on_focus_loss: bool,
    pub history_search: bool,
    pub max_results: u32,
    pub show_centered: bool,
    pub disable_input_method: bool,
    pub debug: bool,
    pub style_light: Option<String>,
    pub style_dark: Option<String>,
    pub actions_modifier: Modifier,
    pub fallbacks_modifier: Modifier,
    pub command_modifier: Modifier,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            always_on_top: true,
            clear_on_hide: true,
            display_scrollbar: false,
            follow_cursor: true,
            hide_on_focus_loss: true,
            history_search: true,
            max_results: 5,
            show_centered: true,
            disable_input_method: true,
            debug: false,
            style_light: None,
            style_dark: None,
            actions_modifier: Modifier::Alt,
            fallbacks_modifier: Modifier::Meta,
            command_modifier: Modifier::Control,
        }
    }
}

impl Preferences {
    /// Read every preference, keeping defaults for absent keys. Style names
    /// not present in `registry` are dropped.
    #[must_use]
    pub fn load(store: &dyn SettingsStore, registry: &StyleRegistry) -> Self {
        let d = Self::default();
        Self {
            always_on_top: store.get_or(keys::ALWAYS_ON_TOP, d.always_on_top),
            clear_on_hide: store.get_or(keys::CLEAR_ON_HIDE, d.clear_on_hide),
            display_scrollbar: store.get_or(keys::DISPLAY_SCROLLBAR, d.display_scrollbar),
            follow_cursor: store.get_or(keys::FOLLOW_CURSOR, d.follow_cursor),
            hide_on_focus_loss: store.get_or(keys::HIDE_ON_FOCUS_LOSS, d.hide_on_focus_loss),
            history_search: store.get_or(keys::HISTORY_SEARCH, d.history_search),
            max_results: store.get_or(keys::MAX_RESULTS, d.max_results),
            show_centered: store.get_or(keys::SHOW_CENTERED, d.show_centered),
            disable_input_method: store
                .get_or(keys::DISABLE_INPUT_METHOD, d.disable_input_method),
            debug: store.get_or(keys::DEBUG, d.debug),
            style_light: known_style(store, keys::STYLE_LIGHT, registry),
            style_dark: known_style(store, keys::STYLE_DARK, registry),
            actions_modifier: store.get_or(keys::ACTIONS_MODIFIER, d.actions_modifier),
            fallbacks_modifier: store.get_or(keys::FALLBACKS_MODIFIER, d.fallbacks_modifier),
            command_modifier: store.get_or(keys::COMMAND_MODIFIER, d.command_modifier),
        }
    }

    /// The style chosen for the given appearance mode.
    #[must_use]
    pub fn style_for(&self, dark_mode: bool) -> Option<&str> {
        if dark_mode {
            self.style_dark.as_deref()
        } else {
            self.style_light.as_deref()
        }
    }
}

fn known_style(store: &dyn SettingsStore, key: &str, registry: &StyleRegistry) -> Option<String> {
    let name: String = store.get(key)?;
    if registry.contains(&name) {
        Some(name)
    } else {
        warn!("Ignoring stored {key}, style does not exist: {name}");
        None
    }
}
