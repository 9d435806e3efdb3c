//! Toolkit-neutral keyboard events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Tab,
    Return,
    Enter,
    Escape,
    Backspace,
    Shift,
    Control,
    Alt,
    Meta,
}

/// A single modifier key, used for configurable bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Shift,
    Meta,
    Control,
    Alt,
}

impl Modifier {
    /// The key that produces this modifier.
    #[must_use]
    pub fn key(self) -> Key {
        match self {
            Modifier::Shift => Key::Shift,
            Modifier::Meta => Key::Meta,
            Modifier::Control => Key::Control,
            Modifier::Alt => Key::Alt,
        }
    }

    #[must_use]
    pub fn as_modifiers(self) -> Modifiers {
        let mut mods = Modifiers::NONE;
        match self {
            Modifier::Shift => mods.shift = true,
            Modifier::Meta => mods.meta = true,
            Modifier::Control => mods.control = true,
            Modifier::Alt => mods.alt = true,
        }
        mods
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Modifier::Shift => "shift",
            Modifier::Meta => "meta",
            Modifier::Control => "control",
            Modifier::Alt => "alt",
        })
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shift" => Ok(Modifier::Shift),
            "meta" | "super" => Ok(Modifier::Meta),
            "control" | "ctrl" => Ok(Modifier::Control),
            "alt" => Ok(Modifier::Alt),
            other => Err(format!("unknown modifier: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        ..Modifiers::NONE
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    #[must_use]
    pub fn contains(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Meta => self.meta,
            Modifier::Control => self.control,
            Modifier::Alt => self.alt,
        }
    }

    #[must_use]
    pub fn without(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Shift => self.shift = false,
            Modifier::Meta => self.meta = false,
            Modifier::Control => self.control = false,
            Modifier::Alt => self.alt = false,
        }
        self
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Modifiers::NONE
    }
}

/// What the window did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    /// Deliver this event to the text editor instead of the original one.
    Forward(KeyEvent),
    /// Deliver the original event to the text editor.
    Ignored,
}

impl KeyOutcome {
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub auto_repeat: bool,
}

impl KeyEvent {
    #[must_use]
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            auto_repeat: false,
        }
    }

    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.auto_repeat = true;
        self
    }

    /// The navigation key an Emacs/Vim style control chord stands for, with
    /// control removed from the modifiers.
    #[must_use]
    pub fn emacs_translation(&self) -> Option<KeyEvent> {
        if !self.modifiers.control {
            return None;
        }
        let Key::Char(c) = self.key else {
            return None;
        };
        let key = match c.to_ascii_lowercase() {
            'p' | 'k' => Key::Up,
            'n' | 'j' => Key::Down,
            'h' => Key::Left,
            'l' => Key::Right,
            'f' | 'd' => Key::PageDown,
            'b' | 'u' => Key::PageUp,
            _ => return None,
        };
        Some(KeyEvent {
            key,
            modifiers: self.modifiers.without(Modifier::Control),
            auto_repeat: self.auto_repeat,
        })
    }

    /// Whether this is `modifiers` + the character `c`, ignoring case.
    #[must_use]
    pub fn is_chord(&self, modifiers: Modifiers, c: char) -> bool {
        self.modifiers == modifiers
            && matches!(self.key, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}
