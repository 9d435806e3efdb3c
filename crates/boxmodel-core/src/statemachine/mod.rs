//! Parallel interaction state machine of the launcher window.

mod machine;
mod regions;
mod signal;
mod timer;

pub use machine::{BUSY_DELAY, DISPLAY_DELAY, StateMachine, Transition};
pub use regions::{ActionsState, ButtonAppearance, ButtonSpin, ResultsState};
pub use signal::{QueryStatus, Signal, Snapshot, UserEvent};
pub use timer::Debounce;
