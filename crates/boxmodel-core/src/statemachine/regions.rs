//! Transition tables of the four parallel regions.
//!
//! Each `next` function is total: it returns the target leaf for a signal, or
//! `None` when the region ignores it.

use super::signal::{Signal, Snapshot, UserEvent};
use std::fmt;

/// Settings button appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonAppearance {
    #[default]
    Hidden,
    Visible,
    Highlighted,
    /// Waiting out the busy delay before highlighting.
    HighlightDelayed,
}

/// Settings button rotation speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonSpin {
    #[default]
    Slow,
    Fast,
}

/// Results list visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResultsState {
    #[default]
    Hidden,
    /// Shown but inert until the new query settles.
    Disabled,
    Matches,
    Fallbacks,
}

/// Actions list visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionsState {
    #[default]
    Hidden,
    Visible,
}

impl ResultsState {
    /// Whether a result list backed by the query is shown.
    #[must_use]
    pub fn shows_list(self) -> bool {
        matches!(self, ResultsState::Matches | ResultsState::Fallbacks)
    }
}

impl ButtonAppearance {
    #[must_use]
    pub fn next(self, signal: Signal, s: &Snapshot) -> Option<Self> {
        use ButtonAppearance::{Hidden, HighlightDelayed, Highlighted, Visible};
        use UserEvent::{InputFrameEnter, InputFrameLeave, SettingsButtonEnter, SettingsButtonLeave};

        let active = s.query.active;
        match (self, signal) {
            (Hidden, Signal::User(InputFrameEnter)) => Some(Visible),
            (Hidden | Visible, Signal::User(SettingsButtonEnter)) => Some(Highlighted),
            (Hidden, Signal::QueryActiveChanged) if active => Some(if s.settings_button_shown {
                Highlighted
            } else {
                HighlightDelayed
            }),

            (Visible, Signal::User(InputFrameLeave)) => Some(Hidden),
            (Visible, Signal::QueryActiveChanged) if active => Some(Highlighted),

            (Highlighted, Signal::QueryActiveChanged) if !active && !s.settings_button_hovered => {
                Some(if s.input_frame_hovered { Visible } else { Hidden })
            }
            (Highlighted, Signal::User(SettingsButtonLeave)) => {
                Some(if s.input_frame_hovered { Visible } else { Hidden })
            }

            (
                HighlightDelayed,
                Signal::BusyDelayElapsed | Signal::User(InputFrameEnter | SettingsButtonEnter),
            ) => Some(Highlighted),
            (HighlightDelayed, Signal::QueryActiveChanged) if !active => Some(Hidden),

            _ => None,
        }
    }
}

impl ButtonSpin {
    #[must_use]
    pub fn next(self, signal: Signal, s: &Snapshot) -> Option<Self> {
        match (self, signal) {
            (ButtonSpin::Slow, Signal::QueryActiveChanged) if s.query.active => {
                Some(ButtonSpin::Fast)
            }
            (ButtonSpin::Fast, Signal::QueryActiveChanged) if !s.query.active => {
                Some(ButtonSpin::Slow)
            }
            _ => None,
        }
    }
}

impl ResultsState {
    #[must_use]
    pub fn next(self, signal: Signal, s: &Snapshot) -> Option<Self> {
        use ResultsState::{Disabled, Fallbacks, Hidden, Matches};
        use UserEvent::{HideFallbacks, ShowFallbacks};

        let q = &s.query;
        let global_fallbacks = q.has_fallbacks && q.global;
        match (self, signal) {
            (Hidden | Disabled, Signal::QueryHasMatches) => Some(Matches),
            (Hidden | Matches, Signal::User(ShowFallbacks)) if q.has_fallbacks => Some(Fallbacks),
            (Hidden, Signal::QueryActiveChanged) if !q.active && global_fallbacks => {
                Some(Fallbacks)
            }

            (Matches | Fallbacks, Signal::QueryChanged) => {
                Some(if q.present { Disabled } else { Hidden })
            }
            // The settle delay keeps counting from the first change
            (Disabled, Signal::QueryChanged) if !q.present => Some(Hidden),

            (Fallbacks, Signal::User(HideFallbacks)) if q.has_matches => Some(Matches),
            (Fallbacks, Signal::User(HideFallbacks)) if q.active => Some(Hidden),

            (Disabled, Signal::DisplayDelayElapsed) => Some(Hidden),
            (Disabled, Signal::QueryActiveChanged) if !q.active => {
                Some(if global_fallbacks { Fallbacks } else { Hidden })
            }

            _ => None,
        }
    }
}

impl ActionsState {
    /// `results` is the results leaf after this signal's results transition.
    #[must_use]
    pub fn next(self, signal: Signal, s: &Snapshot, results: ResultsState) -> Option<Self> {
        use UserEvent::{HideActions, ShowActions, ToggleActions};

        match (self, signal) {
            (ActionsState::Hidden, Signal::User(ShowActions | ToggleActions))
                if results.shows_list() && s.current_row_has_actions =>
            {
                Some(ActionsState::Visible)
            }
            (
                ActionsState::Visible,
                Signal::User(HideActions | ToggleActions) | Signal::ResultsListExited,
            ) => Some(ActionsState::Hidden),
            _ => None,
        }
    }
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

display_as_debug!(ButtonAppearance, ButtonSpin, ResultsState, ActionsState);
