use crate::query::Query;

/// Events the window posts to itself from lower level input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserEvent {
    ShowActions,
    HideActions,
    ToggleActions,
    ShowFallbacks,
    HideFallbacks,
    SettingsButtonEnter,
    SettingsButtonLeave,
    InputFrameEnter,
    InputFrameLeave,
}

/// Everything the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The bound query was replaced, possibly by none.
    QueryChanged,
    QueryActiveChanged,
    QueryHasMatches,
    BusyDelayElapsed,
    DisplayDelayElapsed,
    /// Results left the matches or fallbacks state.
    ResultsListExited,
    User(UserEvent),
}

impl From<UserEvent> for Signal {
    fn from(event: UserEvent) -> Self {
        Signal::User(event)
    }
}

/// Guard-relevant facts about the bound query. A missing query reads as
/// inactive, untriggered and empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct QueryStatus {
    pub present: bool,
    pub active: bool,
    pub global: bool,
    pub has_matches: bool,
    pub has_fallbacks: bool,
}

impl QueryStatus {
    #[must_use]
    pub fn of(query: Option<&dyn Query>) -> Self {
        let Some(query) = query else {
            return Self::default();
        };
        Self {
            present: true,
            active: query.is_active(),
            global: query.is_global(),
            has_matches: !query.matches().is_empty(),
            has_fallbacks: !query.fallbacks().is_empty(),
        }
    }
}

/// The state guards are evaluated against for one signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Snapshot {
    pub query: QueryStatus,
    pub input_frame_hovered: bool,
    pub settings_button_hovered: bool,
    pub settings_button_shown: bool,
    pub current_row_has_actions: bool,
}
