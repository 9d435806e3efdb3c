use super::regions::{ActionsState, ButtonAppearance, ButtonSpin, ResultsState};
use super::signal::{Signal, Snapshot};
use super::timer::Debounce;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Delay before a busy query highlights the hidden settings button.
pub const BUSY_DELAY: Duration = Duration::from_millis(250);

/// Time a disabled results list waits for matches of a new query.
pub const DISPLAY_DELAY: Duration = Duration::from_millis(250);

/// A leaf change in one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Appearance {
        from: ButtonAppearance,
        to: ButtonAppearance,
    },
    Spin {
        from: ButtonSpin,
        to: ButtonSpin,
    },
    Results {
        from: ResultsState,
        to: ResultsState,
    },
    Actions {
        from: ActionsState,
        to: ActionsState,
    },
}

/// The four parallel regions of the window and their timers.
#[derive(Debug, Clone)]
pub struct StateMachine {
    appearance: ButtonAppearance,
    spin: ButtonSpin,
    results: ResultsState,
    actions: ActionsState,
    busy_delay: Debounce,
    display_delay: Debounce,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_delays(BUSY_DELAY, DISPLAY_DELAY)
    }

    #[must_use]
    pub fn with_delays(busy: Duration, display: Duration) -> Self {
        Self {
            appearance: ButtonAppearance::default(),
            spin: ButtonSpin::default(),
            results: ResultsState::default(),
            actions: ActionsState::default(),
            busy_delay: Debounce::new(busy),
            display_delay: Debounce::new(display),
        }
    }

    #[must_use]
    pub fn appearance(&self) -> ButtonAppearance {
        self.appearance
    }

    #[must_use]
    pub fn spin(&self) -> ButtonSpin {
        self.spin
    }

    #[must_use]
    pub fn results(&self) -> ResultsState {
        self.results
    }

    #[must_use]
    pub fn actions(&self) -> ActionsState {
        self.actions
    }

    #[must_use]
    pub fn busy_delay(&self) -> &Debounce {
        &self.busy_delay
    }

    #[must_use]
    pub fn display_delay(&self) -> &Debounce {
        &self.display_delay
    }

    /// Offer `signal` to every region in order: appearance, spin, results,
    /// actions. A results list exit raised on the way is handled in the same
    /// pass, after the signal that caused it.
    pub fn dispatch(&mut self, signal: Signal, snapshot: &Snapshot, now: Instant) -> Vec<Transition> {
        let mut queue = VecDeque::from([signal]);
        let mut transitions = Vec::new();
        while let Some(signal) = queue.pop_front() {
            self.step(signal, snapshot, now, &mut queue, &mut transitions);
        }
        transitions
    }

    /// Fire every due timer.
    pub fn poll(&mut self, snapshot: &Snapshot, now: Instant) -> Vec<Transition> {
        let mut transitions = Vec::new();
        if self.busy_delay.fire_if_due(now) {
            transitions.extend(self.dispatch(Signal::BusyDelayElapsed, snapshot, now));
        }
        if self.display_delay.fire_if_due(now) {
            transitions.extend(self.dispatch(Signal::DisplayDelayElapsed, snapshot, now));
        }
        transitions
    }

    /// The earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.busy_delay.deadline(), self.display_delay.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Return every region to its initial leaf and stop the timers.
    pub fn reset(&mut self) -> Vec<Transition> {
        let mut transitions = Vec::new();
        let initial = Self::with_delays(self.busy_delay.interval(), self.display_delay.interval());
        if self.appearance != initial.appearance {
            transitions.push(Transition::Appearance {
                from: self.appearance,
                to: initial.appearance,
            });
        }
        if self.spin != initial.spin {
            transitions.push(Transition::Spin {
                from: self.spin,
                to: initial.spin,
            });
        }
        if self.results != initial.results {
            transitions.push(Transition::Results {
                from: self.results,
                to: initial.results,
            });
        }
        if self.actions != initial.actions {
            transitions.push(Transition::Actions {
                from: self.actions,
                to: initial.actions,
            });
        }
        *self = initial;
        for t in &transitions {
            debug!("State reset: {t:?}");
        }
        transitions
    }

    fn step(
        &mut self,
        signal: Signal,
        snapshot: &Snapshot,
        now: Instant,
        queue: &mut VecDeque<Signal>,
        transitions: &mut Vec<Transition>,
    ) {
        if let Some(to) = self.appearance.next(signal, snapshot) {
            let from = std::mem::replace(&mut self.appearance, to);
            if from == ButtonAppearance::HighlightDelayed {
                self.busy_delay.cancel();
            }
            if to == ButtonAppearance::HighlightDelayed {
                self.busy_delay.start(now);
            }
            record(signal, Transition::Appearance { from, to }, transitions);
        }

        if let Some(to) = self.spin.next(signal, snapshot) {
            let from = std::mem::replace(&mut self.spin, to);
            record(signal, Transition::Spin { from, to }, transitions);
        }

        if let Some(to) = self.results.next(signal, snapshot) {
            let from = std::mem::replace(&mut self.results, to);
            if from == ResultsState::Disabled {
                self.display_delay.cancel();
            }
            if to == ResultsState::Disabled {
                self.display_delay.start(now);
            }
            if from.shows_list() {
                queue.push_back(Signal::ResultsListExited);
            }
            record(signal, Transition::Results { from, to }, transitions);
        }

        if let Some(to) = self.actions.next(signal, snapshot, self.results) {
            let from = std::mem::replace(&mut self.actions, to);
            record(signal, Transition::Actions { from, to }, transitions);
        }
    }
}

fn record(signal: Signal, transition: Transition, transitions: &mut Vec<Transition>) {
    debug!("{signal:?}: {transition:?}");
    transitions.push(transition);
}
