//! The narrow view the window has of a running query.
//!
//! Query execution, ranking and result production belong to the host. The
//! window only observes a query through [`Query`] and reads its result
//! collections through [`ResultCollection`].

use std::fmt;

/// Identity of a query, unique for the lifetime of the host.
pub type QueryId = u64;

/// Notifications a query emits while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryNotification {
    ActiveChanged(bool),
    /// Rows were added to the matches collection.
    MatchesAdded,
}

/// One row of a result collection, as displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultItem {
    pub text: String,
    pub subtext: String,
    pub icon: Option<String>,
    /// Text the input line completes to on Tab.
    pub input_action_text: String,
    pub actions: Vec<String>,
}

pub trait ResultCollection {
    fn count(&self) -> usize;

    fn item(&self, row: usize) -> Option<ResultItem>;

    /// Run `action` of `row`. Returns whether the window should hide.
    fn activate(&self, row: usize, action: usize) -> bool;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Which collection of a query a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Matches,
    Fallbacks,
}

pub trait Query {
    fn id(&self) -> QueryId;

    /// The trigger the user typed, empty for global queries.
    fn trigger(&self) -> String;

    fn synopsis(&self) -> String;

    fn is_active(&self) -> bool;

    fn matches(&self) -> &dyn ResultCollection;

    fn fallbacks(&self) -> &dyn ResultCollection;

    /// Register `sink` for notifications until the returned guard drops.
    fn subscribe(&self, sink: Box<dyn Fn(QueryNotification)>) -> Subscription;

    fn is_global(&self) -> bool {
        self.trigger().is_empty()
    }

    fn collection(&self, source: ResultSource) -> &dyn ResultCollection {
        match source {
            ResultSource::Matches => self.matches(),
            ResultSource::Fallbacks => self.fallbacks(),
        }
    }
}

/// Detaches a notification sink when dropped.
#[must_use = "dropping a subscription detaches it immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A subscription with nothing to detach.
    pub fn empty() -> Self {
        Self { detach: None }
    }

    pub fn detach(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}
