mod driver;
mod effects;
mod events;
mod keyboard;
mod styles;

pub use events::{
    ControllerEvent, HoverPart, MouseButton, UiEvent, WindowAction, WindowActionItem,
};

use crate::config::{
    DataLocations, Directories, JsonStore, MemoryStore, Preferences, SettingsExt, SettingsStore,
    keys, style_directories,
};
use crate::history::InputHistory;
use crate::keys::Modifier;
use crate::placement::{Desktop, Point, centered_position, target_screen};
use crate::query::{Query, QueryNotification, Subscription};
use crate::statemachine::{QueryStatus, Signal, Snapshot, StateMachine, UserEvent};
use crate::style::{Palette, Style, StyleRegistry};
use crate::styles_query::StylesQueryHandler;
use crate::view::{
    ActionItemStyle, InputLine, ListModel, ListView, Panel, RenderCache, ResultItemStyle,
    SettingsButton, WindowFrame,
};
use crate::watcher::StyleWatcher;
use serde::Serialize;
use std::rc::Rc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// The actions list is never limited by the results item count.
const ACTIONS_MAX_ITEMS: u32 = 100;

/// The list that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Results,
    Actions,
}

/// Collaborators the controller is built from.
pub struct Environment {
    /// Persisted preferences.
    pub settings: Box<dyn SettingsStore>,
    /// Window state such as the last position.
    pub state: Box<dyn SettingsStore>,
    pub locations: Box<dyn DataLocations>,
    pub desktop: Box<dyn Desktop>,
    pub history: InputHistory,
    /// Reload styles when their files change.
    pub watch_styles: bool,
}

impl Environment {
    /// File backed stores under `dirs`.
    #[must_use]
    pub fn from_directories(dirs: &Directories, desktop: Box<dyn Desktop>) -> Self {
        Self {
            settings: Box::new(JsonStore::open(&dirs.settings_file)),
            state: Box::new(JsonStore::open(&dirs.state_file)),
            locations: Box::new(dirs.clone()),
            desktop,
            history: InputHistory::load(&dirs.history_file),
            watch_styles: true,
        }
    }

    /// Nothing is persisted.
    #[must_use]
    pub fn in_memory(locations: Box<dyn DataLocations>, desktop: Box<dyn Desktop>) -> Self {
        Self {
            settings: Box::new(MemoryStore::new()),
            state: Box::new(MemoryStore::new()),
            locations,
            desktop,
            history: InputHistory::new(),
            watch_styles: false,
        }
    }
}

type Observer = Box<dyn FnMut(&ControllerEvent)>;

/// Owns the launcher window: its visual primitives, the current style, the
/// bound query and the interaction state machine.
///
/// Everything runs on one thread. Work that must happen on a later turn is
/// posted as a [`UiEvent`] and handled by [`WindowController::run`] or
/// [`WindowController::process_pending`].
pub struct WindowController {
    settings: Box<dyn SettingsStore>,
    state: Box<dyn SettingsStore>,
    locations: Box<dyn DataLocations>,
    desktop: Box<dyn Desktop>,
    watch_styles: bool,

    prefs: Preferences,
    registry: StyleRegistry,
    style: Style,
    dark_mode: bool,
    edit_mode: bool,
    machine: StateMachine,

    query: Option<Rc<dyn Query>>,
    subscription: Option<Subscription>,
    /// The bound query had no matches yet; the first insert counts.
    awaiting_first_match: bool,

    frame: WindowFrame,
    input_frame: Panel,
    input: InputLine,
    button: SettingsButton,
    results: ListView<ResultItemStyle>,
    actions: ListView<ActionItemStyle>,
    cache: RenderCache<Vec<u8>>,
    nav: Option<NavTarget>,
    input_frame_hovered: bool,
    settings_button_hovered: bool,

    styles_handler: StylesQueryHandler,
    watcher: Option<StyleWatcher>,
    observers: Vec<Observer>,
    tx: UnboundedSender<UiEvent>,
    rx: UnboundedReceiver<UiEvent>,
}

impl WindowController {
    /// Load preferences and the window state. The initial style is applied
    /// on the next turn.
    #[must_use]
    pub fn new(env: Environment) -> Self {
        let Environment {
            settings,
            state,
            locations,
            desktop,
            history,
            watch_styles,
        } = env;
        let (tx, rx) = mpsc::unbounded_channel();

        let registry = StyleRegistry::scan(style_directories(locations.as_ref()));
        let prefs = Preferences::load(settings.as_ref(), &registry);
        let dark_mode = desktop.dark_mode();
        let style = Style::from_palette(&Palette::system(dark_mode));

        let mut frame = WindowFrame {
            always_on_top: prefs.always_on_top,
            ..WindowFrame::default()
        };
        if !prefs.show_centered {
            frame.position = state.get::<Point>(keys::WINDOW_POSITION);
        }

        let mut input = InputLine::new(history);
        input.history_search = prefs.history_search;
        input.disable_input_method = prefs.disable_input_method;

        let mut results = ListView::new(&style, prefs.max_results);
        results.display_scrollbar = prefs.display_scrollbar;
        results.debug = prefs.debug;
        let mut actions = ListView::new(&style, ACTIONS_MAX_ITEMS);
        actions.debug = prefs.debug;

        info!(
            "Window controller ready ({} styles, dark mode: {dark_mode})",
            registry.len()
        );

        let controller = Self {
            settings,
            state,
            locations,
            desktop,
            watch_styles,
            prefs,
            registry,
            style,
            dark_mode,
            edit_mode: false,
            machine: StateMachine::new(),
            query: None,
            subscription: None,
            awaiting_first_match: false,
            frame,
            input_frame: Panel::default(),
            input,
            button: SettingsButton::default(),
            results,
            actions,
            cache: RenderCache::default(),
            nav: None,
            input_frame_hovered: false,
            settings_button_hovered: false,
            styles_handler: StylesQueryHandler::new(),
            watcher: None,
            observers: Vec::new(),
            tx,
            rx,
        };
        controller.post(UiEvent::ApplyInitialStyle);
        controller
    }

    /// Register a callback for [`ControllerEvent`]s.
    pub fn add_observer(&mut self, observer: impl FnMut(&ControllerEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// A handle for posting events from outside, e.g. theme changes.
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<UiEvent> {
        self.tx.clone()
    }

    /// Queue `event` for the next turn.
    pub fn post(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            warn!("Event channel closed");
        }
    }

    /// Handle everything queued so far, then fire due timers.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
        }
        self.poll_timers();
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ApplyInitialStyle | UiEvent::StyleFileChanged => self.reload_style(),
            UiEvent::Query { id, notification } => self.query_notified(id, notification),
            UiEvent::User(event) => self.dispatch(event.into()),
            UiEvent::ThemeChanged { dark_mode } => self.theme_changed(dark_mode),
            UiEvent::Quit => debug!("Quit requested outside the driver loop"),
        }
    }

    /// Fire the state machine timers that are due.
    pub fn poll_timers(&mut self) {
        let snapshot = self.snapshot();
        let transitions = self.machine.poll(&snapshot, Instant::now());
        self.apply_transitions(&transitions);
    }

    /// The facts the state machine guards read.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            query: QueryStatus::of(self.query.as_deref()),
            input_frame_hovered: self.input_frame_hovered,
            settings_button_hovered: self.settings_button_hovered,
            settings_button_shown: self.button.visible,
            current_row_has_actions: self
                .results
                .current_item()
                .is_some_and(|item| !item.actions.is_empty()),
        }
    }

    fn dispatch(&mut self, signal: Signal) {
        let snapshot = self.snapshot();
        let transitions = self.machine.dispatch(signal, &snapshot, Instant::now());
        self.apply_transitions(&transitions);
    }

    fn emit(&mut self, event: ControllerEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    // Query binding

    #[must_use]
    pub fn query(&self) -> Option<&Rc<dyn Query>> {
        self.query.as_ref()
    }

    /// Bind `query`, detaching the previous one first.
    pub fn set_query(&mut self, query: Option<Rc<dyn Query>>) {
        if let Some(subscription) = self.subscription.take() {
            subscription.detach();
        }
        self.awaiting_first_match = false;
        self.query = query;
        self.dispatch(Signal::QueryChanged);

        let Some(query) = self.query.clone() else {
            return;
        };
        debug!("Bound query {}", query.id());

        self.input.trigger_length = query.trigger().chars().count();
        self.input.synopsis = query.synopsis();
        self.input.completion.clear();

        let id = query.id();
        let tx = self.tx.clone();
        self.subscription = Some(query.subscribe(Box::new(move |notification: QueryNotification| {
            if tx.send(UiEvent::Query { id, notification }).is_err() {
                debug!("Dropped notification of query {id}");
            }
        })));

        self.dispatch(Signal::QueryActiveChanged);
        if query.matches().is_empty() {
            self.awaiting_first_match = true;
        } else {
            self.dispatch(Signal::QueryHasMatches);
        }
    }

    fn query_notified(&mut self, id: u64, notification: QueryNotification) {
        if self.query.as_ref().is_none_or(|q| q.id() != id) {
            debug!("Ignoring {notification:?} of stale query {id}");
            return;
        }
        match notification {
            QueryNotification::ActiveChanged(_) => self.dispatch(Signal::QueryActiveChanged),
            QueryNotification::MatchesAdded => {
                self.results.rows_inserted();
                self.update_completion();
                if std::mem::take(&mut self.awaiting_first_match) {
                    self.dispatch(Signal::QueryHasMatches);
                }
            }
        }
    }

    // Visibility and placement

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.frame.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }

    pub fn toggle(&mut self) {
        self.set_visible(!self.frame.visible);
    }

    /// Show the window, centering it when configured or when the last
    /// position is no longer on any screen.
    pub fn show(&mut self) {
        if self.frame.visible {
            return;
        }
        let off_screen = self
            .frame
            .position
            .is_none_or(|p| !self.desktop.is_on_screen(p));
        if self.prefs.show_centered || off_screen {
            let screen = target_screen(self.desktop.as_ref(), self.prefs.follow_cursor);
            let width = i32::try_from(self.frame.outer_width()).unwrap_or(i32::MAX);
            self.frame.position = Some(centered_position(screen, width));
        }
        self.frame.visible = true;
        if self.desktop.raise_on_show() {
            self.emit(ControllerEvent::Raise);
        }
        self.emit(ControllerEvent::VisibleChanged(true));
    }

    /// Hide the window, remembering its position and the input.
    pub fn hide(&mut self) {
        if !self.frame.visible {
            return;
        }
        if let Some(position) = self.frame.position {
            self.state.set(keys::WINDOW_POSITION, &position);
        }
        self.set_edit_mode(false);
        self.cache.clear();

        let before = self.input.text().to_string();
        self.input.on_hide(self.prefs.clear_on_hide);
        self.input_changed(&before);

        self.frame.visible = false;
        self.emit(ControllerEvent::VisibleChanged(false));
    }

    /// The host moved the window.
    pub fn set_position(&mut self, position: Point) {
        self.frame.position = Some(position);
    }

    // Pointer and focus

    pub fn pointer_entered(&mut self, part: HoverPart) {
        match part {
            HoverPart::InputFrame => {
                self.input_frame_hovered = true;
                self.post(UiEvent::User(UserEvent::InputFrameEnter));
            }
            HoverPart::SettingsButton => {
                self.settings_button_hovered = true;
                self.post(UiEvent::User(UserEvent::SettingsButtonEnter));
            }
        }
    }

    pub fn pointer_left(&mut self, part: HoverPart) {
        match part {
            HoverPart::InputFrame => {
                self.input_frame_hovered = false;
                self.post(UiEvent::User(UserEvent::InputFrameLeave));
            }
            HoverPart::SettingsButton => {
                self.settings_button_hovered = false;
                self.post(UiEvent::User(UserEvent::SettingsButtonLeave));
            }
        }
    }

    /// The window gained activation with the pointer over `hovered`.
    /// Hiding and showing produce no enter events, so they are synthesized.
    pub fn window_activated(&mut self, hovered: &[HoverPart]) {
        for part in hovered {
            self.pointer_entered(*part);
        }
    }

    /// The window lost activation.
    pub fn window_deactivated(&mut self) {
        self.pointer_left(HoverPart::SettingsButton);
        self.pointer_left(HoverPart::InputFrame);
        if self.prefs.hide_on_focus_loss {
            self.hide();
        }
    }

    pub fn settings_button_clicked(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.emit(ControllerEvent::OpenSettings),
            MouseButton::Right => {
                let items = self.window_actions();
                self.emit(ControllerEvent::ShowContextMenu(items));
            }
            MouseButton::Middle => {}
        }
    }

    /// The context menu entries with their current toggle states.
    #[must_use]
    pub fn window_actions(&self) -> Vec<WindowActionItem> {
        WindowAction::ALL
            .into_iter()
            .map(|action| WindowActionItem {
                action,
                checked: match action {
                    WindowAction::Settings => None,
                    WindowAction::HideOnFocusLoss => Some(self.prefs.hide_on_focus_loss),
                    WindowAction::ShowCentered => Some(self.prefs.show_centered),
                    WindowAction::ClearOnHide => Some(self.prefs.clear_on_hide),
                    WindowAction::EditMode => Some(self.edit_mode),
                    WindowAction::Debug => Some(self.prefs.debug),
                },
            })
            .collect()
    }

    pub fn trigger_window_action(&mut self, action: WindowAction) {
        debug!("Window action: {}", action.label());
        match action {
            WindowAction::Settings => self.emit(ControllerEvent::OpenSettings),
            WindowAction::HideOnFocusLoss => {
                self.set_hide_on_focus_loss(!self.prefs.hide_on_focus_loss);
            }
            WindowAction::ShowCentered => self.set_show_centered(!self.prefs.show_centered),
            WindowAction::ClearOnHide => self.set_clear_on_hide(!self.prefs.clear_on_hide),
            WindowAction::EditMode => self.set_edit_mode(!self.edit_mode),
            WindowAction::Debug => self.set_debug(!self.prefs.debug),
        }
    }

    // Input

    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// In edit mode the input behaves like a plain text editor.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        if self.edit_mode != enabled {
            self.edit_mode = enabled;
            self.emit(ControllerEvent::EditModeChanged(enabled));
        }
    }

    /// The user changed the input text.
    pub fn input_edited(&mut self, text: &str) {
        let before = self.input.text().to_string();
        self.input.edit(text);
        self.input_changed(&before);
    }

    /// Replace the input text programmatically.
    pub fn set_input_text(&mut self, text: &str) {
        let before = self.input.text().to_string();
        self.input.set_text(text);
        self.input_changed(&before);
    }

    fn input_changed(&mut self, before: &str) {
        if self.input.text() != before {
            let text = self.input.text().to_string();
            self.emit(ControllerEvent::InputChanged(text));
        }
    }

    fn update_completion(&mut self) {
        self.input.completion = if self.machine.results().shows_list() {
            self.results
                .current_item()
                .map(|item| item.input_action_text)
                .unwrap_or_default()
        } else {
            String::new()
        };
    }

    // Activation

    /// Activate the selected row of the list with keyboard focus.
    pub fn activate_current(&mut self, shift: bool) {
        match self.nav {
            Some(NavTarget::Results) => {
                if let Some(row) = self.results.current_row() {
                    self.activate(row, 0, shift);
                }
            }
            Some(NavTarget::Actions) => {
                if let (Some(row), Some(action)) =
                    (self.results.current_row(), self.actions.current_row())
                {
                    self.activate(row, action, shift);
                }
            }
            None => {}
        }
    }

    /// A result row was clicked.
    pub fn result_clicked(&mut self, row: usize, shift: bool) {
        if self.results.input_transparent {
            return;
        }
        self.results.set_current_row(row);
        self.update_completion();
        self.activate(row, 0, shift);
    }

    /// An action row was clicked.
    pub fn action_clicked(&mut self, action: usize, shift: bool) {
        if let Some(row) = self.results.current_row() {
            self.actions.set_current_row(action);
            self.activate(row, action, shift);
        }
    }

    /// Run `action` of `row` and hide unless shift inverts the result.
    fn activate(&mut self, row: usize, action: usize, shift: bool) {
        let Some(ListModel::Results { query, source }) = self.results.model().cloned() else {
            return;
        };
        let should_hide = query.collection(source).activate(row, action);
        debug!("Activated row {row} action {action} of {source:?}, hide: {should_hide}");
        if should_hide != shift {
            self.hide();
        }
    }

    // Preferences

    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    fn store_preference<T: Serialize>(&mut self, key: &'static str, value: &T) {
        self.settings.set(key, value);
        match serde_json::to_value(value) {
            Ok(value) => self.emit(ControllerEvent::PreferenceChanged { key, value }),
            Err(e) => warn!("Cannot report preference {key}: {e}"),
        }
    }

    pub fn set_always_on_top(&mut self, value: bool) {
        if self.prefs.always_on_top != value {
            self.prefs.always_on_top = value;
            self.frame.always_on_top = value;
            self.store_preference(keys::ALWAYS_ON_TOP, &value);
        }
    }

    pub fn set_clear_on_hide(&mut self, value: bool) {
        if self.prefs.clear_on_hide != value {
            self.prefs.clear_on_hide = value;
            self.store_preference(keys::CLEAR_ON_HIDE, &value);
        }
    }

    pub fn set_display_scrollbar(&mut self, value: bool) {
        if self.prefs.display_scrollbar != value {
            self.prefs.display_scrollbar = value;
            self.results.display_scrollbar = value;
            self.cache.clear();
            self.store_preference(keys::DISPLAY_SCROLLBAR, &value);
        }
    }

    pub fn set_follow_cursor(&mut self, value: bool) {
        if self.prefs.follow_cursor != value {
            self.prefs.follow_cursor = value;
            self.store_preference(keys::FOLLOW_CURSOR, &value);
        }
    }

    pub fn set_hide_on_focus_loss(&mut self, value: bool) {
        if self.prefs.hide_on_focus_loss != value {
            self.prefs.hide_on_focus_loss = value;
            self.store_preference(keys::HIDE_ON_FOCUS_LOSS, &value);
        }
    }

    pub fn set_history_search(&mut self, value: bool) {
        if self.prefs.history_search != value {
            self.prefs.history_search = value;
            self.input.history_search = value;
            self.store_preference(keys::HISTORY_SEARCH, &value);
        }
    }

    pub fn set_max_results(&mut self, value: u32) {
        if self.prefs.max_results != value {
            self.prefs.max_results = value;
            self.results.max_items = value;
            self.cache.clear();
            self.store_preference(keys::MAX_RESULTS, &value);
        }
    }

    pub fn set_show_centered(&mut self, value: bool) {
        if self.prefs.show_centered != value {
            self.prefs.show_centered = value;
            self.store_preference(keys::SHOW_CENTERED, &value);
        }
    }

    pub fn set_disable_input_method(&mut self, value: bool) {
        if self.prefs.disable_input_method != value {
            self.prefs.disable_input_method = value;
            self.input.disable_input_method = value;
            self.store_preference(keys::DISABLE_INPUT_METHOD, &value);
        }
    }

    pub fn set_debug(&mut self, value: bool) {
        if self.prefs.debug != value {
            self.prefs.debug = value;
            self.results.debug = value;
            self.actions.debug = value;
            self.cache.clear();
            self.store_preference(keys::DEBUG, &value);
        }
    }

    pub fn set_actions_modifier(&mut self, value: Modifier) {
        if self.prefs.actions_modifier != value {
            self.prefs.actions_modifier = value;
            self.store_preference(keys::ACTIONS_MODIFIER, &value);
        }
    }

    pub fn set_fallbacks_modifier(&mut self, value: Modifier) {
        if self.prefs.fallbacks_modifier != value {
            self.prefs.fallbacks_modifier = value;
            self.store_preference(keys::FALLBACKS_MODIFIER, &value);
        }
    }

    pub fn set_command_modifier(&mut self, value: Modifier) {
        if self.prefs.command_modifier != value {
            self.prefs.command_modifier = value;
            self.store_preference(keys::COMMAND_MODIFIER, &value);
        }
    }

    // View model

    #[must_use]
    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }

    #[must_use]
    pub fn navigation_target(&self) -> Option<NavTarget> {
        self.nav
    }

    #[must_use]
    pub fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    #[must_use]
    pub fn input_frame(&self) -> &Panel {
        &self.input_frame
    }

    #[must_use]
    pub fn input(&self) -> &InputLine {
        &self.input
    }

    #[must_use]
    pub fn settings_button(&self) -> &SettingsButton {
        &self.button
    }

    /// The renderer advances animations through this.
    pub fn settings_button_mut(&mut self) -> &mut SettingsButton {
        &mut self.button
    }

    #[must_use]
    pub fn results(&self) -> &ListView<ResultItemStyle> {
        &self.results
    }

    #[must_use]
    pub fn actions(&self) -> &ListView<ActionItemStyle> {
        &self.actions
    }

    pub fn render_cache(&mut self) -> &mut RenderCache<Vec<u8>> {
        &mut self.cache
    }
}
