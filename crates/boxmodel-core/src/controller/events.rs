use crate::keys::{KeyEvent, Modifiers};
use crate::query::{QueryId, QueryNotification};
use crate::statemachine::UserEvent;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Events queued for the controller's next processing turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ApplyInitialStyle,
    Query {
        id: QueryId,
        notification: QueryNotification,
    },
    User(UserEvent),
    StyleFileChanged,
    ThemeChanged {
        dark_mode: bool,
    },
    /// Stop the driver loop.
    Quit,
}

/// Notifications the controller sends to its observers.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    VisibleChanged(bool),
    /// The host should raise and activate the window.
    Raise,
    InputChanged(String),
    StyleApplied,
    PreferenceChanged { key: &'static str, value: Value },
    EditModeChanged(bool),
    /// A problem the user should see, e.g. a broken style file.
    Warning(String),
    OpenSettings,
    ShowContextMenu(Vec<WindowActionItem>),
    OpenPath(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Parts of the window that report pointer hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPart {
    InputFrame,
    SettingsButton,
}

/// Commands available from the settings button context menu and shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAction {
    Settings,
    HideOnFocusLoss,
    ShowCentered,
    ClearOnHide,
    EditMode,
    Debug,
}

impl WindowAction {
    pub const ALL: [WindowAction; 6] = [
        WindowAction::Settings,
        WindowAction::HideOnFocusLoss,
        WindowAction::ShowCentered,
        WindowAction::ClearOnHide,
        WindowAction::EditMode,
        WindowAction::Debug,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WindowAction::Settings => "Settings",
            WindowAction::HideOnFocusLoss => "Hide on focus out",
            WindowAction::ShowCentered => "Show centered",
            WindowAction::ClearOnHide => "Clear on hide",
            WindowAction::EditMode => "Input edit mode",
            WindowAction::Debug => "Debug mode",
        }
    }

    /// The modifiers and key that trigger the action.
    #[must_use]
    pub fn shortcut(self) -> (Modifiers, char) {
        match self {
            WindowAction::Settings => (Modifiers::CONTROL, ','),
            WindowAction::HideOnFocusLoss => (Modifiers::META, 'h'),
            WindowAction::ShowCentered => (Modifiers::META, 'c'),
            WindowAction::ClearOnHide => (Modifiers::META, 'i'),
            WindowAction::EditMode => (Modifiers::META, 'e'),
            WindowAction::Debug => (Modifiers::META, 'd'),
        }
    }

    #[must_use]
    pub fn matching(event: &KeyEvent) -> Option<WindowAction> {
        Self::ALL.into_iter().find(|a| {
            let (mods, c) = a.shortcut();
            event.is_chord(mods, c)
        })
    }
}

impl fmt::Display for WindowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mods, c) = self.shortcut();
        let prefix = if mods.control { "Ctrl" } else { "Meta" };
        write!(f, "{} ({prefix}+{})", self.label(), c.to_ascii_uppercase())
    }
}

/// A context menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowActionItem {
    pub action: WindowAction,
    /// Toggle state, `None` for plain commands.
    pub checked: Option<bool>,
}
