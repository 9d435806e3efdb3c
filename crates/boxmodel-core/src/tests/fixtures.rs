//! Test fixtures and helpers

use crate::config::{MemoryStore, SettingsStore};
use crate::controller::{ControllerEvent, Environment, WindowController};
use crate::history::InputHistory;
use crate::placement::StaticDesktop;
use crate::query::{
    Query, QueryId, QueryNotification, ResultCollection, ResultItem, Subscription,
};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// The eleven mandatory palette roles.
pub const FULL_PALETTE: &str = "[palette]
base=#101010
text=#f0f0f0
window=#202020
window_text=#e0e0e0
button=#646464
button_text=#ffffff
highlight=#3daee9
highlight_text=#000000
placeholder_text=#808080
link=#0000ff
link_visited=#ff00ff
";

/// Create a result row with the given action labels
pub fn make_item(text: &str, actions: &[&str]) -> ResultItem {
    ResultItem {
        text: text.to_string(),
        subtext: format!("{text} subtext"),
        input_action_text: text.to_string(),
        actions: actions.iter().map(|a| (*a).to_string()).collect(),
        ..ResultItem::default()
    }
}

/// A result collection that records activations.
#[derive(Default)]
pub struct FakeCollection {
    items: RefCell<Vec<ResultItem>>,
    pub activations: RefCell<Vec<(usize, usize)>>,
    pub hide_on_activate: Cell<bool>,
}

impl FakeCollection {
    pub fn push(&self, item: ResultItem) {
        self.items.borrow_mut().push(item);
    }
}

impl ResultCollection for FakeCollection {
    fn count(&self) -> usize {
        self.items.borrow().len()
    }

    fn item(&self, row: usize) -> Option<ResultItem> {
        self.items.borrow().get(row).cloned()
    }

    fn activate(&self, row: usize, action: usize) -> bool {
        self.activations.borrow_mut().push((row, action));
        self.hide_on_activate.get()
    }
}

type Sinks = Rc<RefCell<Vec<(usize, Box<dyn Fn(QueryNotification)>)>>>;

/// A query driven by the test.
pub struct FakeQuery {
    id: QueryId,
    trigger: String,
    active: Cell<bool>,
    pub matches: FakeCollection,
    pub fallbacks: FakeCollection,
    sinks: Sinks,
    next_sink: Cell<usize>,
}

impl FakeQuery {
    /// An active, global query without results
    pub fn new(id: QueryId) -> Self {
        Self {
            id,
            trigger: String::new(),
            active: Cell::new(true),
            matches: FakeCollection::default(),
            fallbacks: FakeCollection::default(),
            sinks: Rc::default(),
            next_sink: Cell::new(0),
        }
    }

    pub fn triggered(mut self, trigger: &str) -> Self {
        self.trigger = trigger.to_string();
        self
    }

    pub fn inactive(self) -> Self {
        self.active.set(false);
        self
    }

    pub fn with_matches(self, items: Vec<ResultItem>) -> Self {
        for item in items {
            self.matches.push(item);
        }
        self
    }

    pub fn with_fallbacks(self, count: usize) -> Self {
        for i in 0..count {
            self.fallbacks.push(make_item(&format!("fallback {i}"), &[]));
        }
        self
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
        self.emit(QueryNotification::ActiveChanged(active));
    }

    pub fn add_match(&self, item: ResultItem) {
        self.matches.push(item);
        self.emit(QueryNotification::MatchesAdded);
    }

    pub fn emit(&self, notification: QueryNotification) {
        for (_, sink) in self.sinks.borrow().iter() {
            sink(notification);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.borrow().len()
    }
}

impl Query for FakeQuery {
    fn id(&self) -> QueryId {
        self.id
    }

    fn trigger(&self) -> String {
        self.trigger.clone()
    }

    fn synopsis(&self) -> String {
        format!("<{}>", self.trigger.trim())
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn matches(&self) -> &dyn ResultCollection {
        &self.matches
    }

    fn fallbacks(&self) -> &dyn ResultCollection {
        &self.fallbacks
    }

    fn subscribe(&self, sink: Box<dyn Fn(QueryNotification)>) -> Subscription {
        let key = self.next_sink.get();
        self.next_sink.set(key + 1);
        self.sinks.borrow_mut().push((key, sink));
        let sinks = Rc::clone(&self.sinks);
        Subscription::new(move || sinks.borrow_mut().retain(|(k, _)| *k != key))
    }
}

/// Bind `query` to the controller while the test keeps its own handle.
pub fn bind(controller: &mut WindowController, query: &Rc<FakeQuery>) {
    let query: Rc<dyn Query> = query.clone();
    controller.set_query(Some(query));
}

/// A settings store the test can inspect after handing it to a controller.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().value(key)
    }
}

impl SettingsStore for SharedStore {
    fn value(&self, key: &str) -> Option<Value> {
        self.0.borrow().value(key)
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.0.borrow_mut().set_value(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

/// Write style files into a `styles` directory under a new temp dir.
pub fn style_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let styles = dir.path().join("styles");
    std::fs::create_dir_all(&styles).unwrap();
    for (name, text) in files {
        std::fs::write(styles.join(format!("{name}.ini")), text).unwrap();
    }
    dir
}

/// A controller wired to in-memory collaborators.
pub struct TestWindow {
    pub controller: WindowController,
    pub events: Rc<RefCell<Vec<ControllerEvent>>>,
    pub settings: SharedStore,
    pub state: SharedStore,
    pub dir: TempDir,
}

impl TestWindow {
    pub fn styles_path(&self) -> PathBuf {
        self.dir.path().join("styles")
    }

    pub fn take_events(&self) -> Vec<ControllerEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

pub struct TestWindowBuilder {
    styles: Vec<(String, String)>,
    settings: SharedStore,
    state: SharedStore,
    desktop: StaticDesktop,
    history: InputHistory,
}

impl TestWindowBuilder {
    pub fn style(mut self, name: &str, text: &str) -> Self {
        self.styles.push((name.to_string(), text.to_string()));
        self
    }

    pub fn setting(self, key: &str, value: Value) -> Self {
        self.settings.0.borrow_mut().set_value(key, value);
        self
    }

    pub fn state(self, key: &str, value: Value) -> Self {
        self.state.0.borrow_mut().set_value(key, value);
        self
    }

    pub fn desktop(mut self, desktop: StaticDesktop) -> Self {
        self.desktop = desktop;
        self
    }

    pub fn history(mut self, entries: &[&str]) -> Self {
        for entry in entries.iter().rev() {
            self.history.add(entry);
        }
        self
    }

    /// Build the controller and run its first turn, which applies the
    /// initial style. Events of that turn are discarded.
    pub fn build(self) -> TestWindow {
        let files: Vec<(&str, &str)> = self
            .styles
            .iter()
            .map(|(n, t)| (n.as_str(), t.as_str()))
            .collect();
        let dir = style_dir(&files);

        let env = Environment {
            settings: Box::new(self.settings.clone()),
            state: Box::new(self.state.clone()),
            locations: Box::new(vec![dir.path().to_path_buf()]),
            desktop: Box::new(self.desktop),
            history: self.history,
            watch_styles: false,
        };
        let mut controller = WindowController::new(env);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.add_observer(move |event| sink.borrow_mut().push(event.clone()));
        controller.process_pending();
        events.borrow_mut().clear();

        TestWindow {
            controller,
            events,
            settings: self.settings,
            state: self.state,
            dir,
        }
    }
}

pub fn window() -> TestWindowBuilder {
    TestWindowBuilder {
        styles: Vec::new(),
        settings: SharedStore::default(),
        state: SharedStore::default(),
        desktop: StaticDesktop::default(),
        history: InputHistory::new(),
    }
}
