//! State machine invariants over random signal sequences.

use crate::statemachine::{
    ActionsState, ButtonAppearance, QueryStatus, ResultsState, Signal, Snapshot, StateMachine,
    Transition, UserEvent,
};
use proptest::prelude::*;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
enum Op {
    Dispatch(Signal, Snapshot),
    Advance(u64, Snapshot),
}

fn snapshot() -> impl Strategy<Value = Snapshot> {
    any::<[bool; 9]>().prop_map(|b| {
        let present = b[0];
        Snapshot {
            query: QueryStatus {
                present,
                active: present && b[1],
                global: present && b[2],
                has_matches: present && b[3],
                has_fallbacks: present && b[4],
            },
            input_frame_hovered: b[5],
            settings_button_hovered: b[6],
            settings_button_shown: b[7],
            current_row_has_actions: b[8],
        }
    })
}

fn signal() -> impl Strategy<Value = Signal> {
    prop_oneof![
        Just(Signal::QueryChanged),
        Just(Signal::QueryActiveChanged),
        Just(Signal::QueryHasMatches),
        prop::sample::select(vec![
            UserEvent::ShowActions,
            UserEvent::HideActions,
            UserEvent::ToggleActions,
            UserEvent::ShowFallbacks,
            UserEvent::HideFallbacks,
            UserEvent::SettingsButtonEnter,
            UserEvent::SettingsButtonLeave,
            UserEvent::InputFrameEnter,
            UserEvent::InputFrameLeave,
        ])
        .prop_map(Signal::User),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (signal(), snapshot()).prop_map(|(s, snap)| Op::Dispatch(s, snap)),
        1 => (0u64..400, snapshot()).prop_map(|(ms, snap)| Op::Advance(ms, snap)),
    ]
}

fn assert_invariants(sm: &StateMachine) {
    if sm.actions() == ActionsState::Visible {
        assert!(
            sm.results().shows_list(),
            "actions visible without a result list: {:?}",
            sm.results()
        );
    }
    assert_eq!(
        sm.busy_delay().is_running(),
        sm.appearance() == ButtonAppearance::HighlightDelayed
    );
    assert_eq!(
        sm.display_delay().is_running(),
        sm.results() == ResultsState::Disabled
    );
}

fn assert_one_transition_per_region(transitions: &[Transition]) {
    let count = |f: fn(&Transition) -> bool| transitions.iter().filter(|t| f(t)).count();
    assert!(count(|t| matches!(t, Transition::Appearance { .. })) <= 1);
    assert!(count(|t| matches!(t, Transition::Spin { .. })) <= 1);
    assert!(count(|t| matches!(t, Transition::Results { .. })) <= 1);
    assert!(count(|t| matches!(t, Transition::Actions { .. })) <= 1);
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_step(ops in prop::collection::vec(op(), 1..60)) {
        let mut sm = StateMachine::new();
        let mut now = Instant::now();
        for op in ops {
            match op {
                Op::Dispatch(signal, snapshot) => {
                    let transitions = sm.dispatch(signal, &snapshot, now);
                    assert_one_transition_per_region(&transitions);
                    for t in &transitions {
                        if let Transition::Results { from, to } = t {
                            prop_assert_ne!(from, to);
                        }
                    }
                }
                Op::Advance(ms, snapshot) => {
                    now += Duration::from_millis(ms);
                    sm.poll(&snapshot, now);
                }
            }
            assert_invariants(&sm);
        }
    }

    #[test]
    fn prop_reset_returns_to_initial_leaves(ops in prop::collection::vec(op(), 0..30)) {
        let mut sm = StateMachine::new();
        let now = Instant::now();
        for op in ops {
            if let Op::Dispatch(signal, snapshot) = op {
                sm.dispatch(signal, &snapshot, now);
            }
        }
        sm.reset();
        prop_assert_eq!(sm.appearance(), ButtonAppearance::Hidden);
        prop_assert_eq!(sm.results(), ResultsState::Hidden);
        prop_assert_eq!(sm.actions(), ActionsState::Hidden);
        prop_assert_eq!(sm.next_deadline(), None);
    }
}

fn active_query(has_matches: bool) -> Snapshot {
    Snapshot {
        query: QueryStatus {
            present: true,
            active: true,
            has_matches,
            ..QueryStatus::default()
        },
        ..Snapshot::default()
    }
}

#[test]
fn test_busy_delay_highlights_after_interval() {
    let mut sm = StateMachine::new();
    let now = Instant::now();
    let snapshot = active_query(false);
    sm.dispatch(Signal::QueryActiveChanged, &snapshot, now);
    assert_eq!(sm.appearance(), ButtonAppearance::HighlightDelayed);

    assert!(sm.poll(&snapshot, now + Duration::from_millis(249)).is_empty());
    sm.poll(&snapshot, now + Duration::from_millis(250));
    assert_eq!(sm.appearance(), ButtonAppearance::Highlighted);
}

#[test]
fn test_hover_during_delay_cancels_timer() {
    let mut sm = StateMachine::new();
    let now = Instant::now();
    let snapshot = active_query(false);
    sm.dispatch(Signal::QueryActiveChanged, &snapshot, now);
    let hovered = Snapshot {
        input_frame_hovered: true,
        ..snapshot
    };
    sm.dispatch(UserEvent::InputFrameEnter.into(), &hovered, now);
    assert_eq!(sm.appearance(), ButtonAppearance::Highlighted);
    assert!(!sm.busy_delay().is_running());
    assert!(sm.poll(&hovered, now + Duration::from_secs(1)).is_empty());
}

#[test]
fn test_query_going_inactive_before_delay_hides() {
    let mut sm = StateMachine::new();
    let now = Instant::now();
    sm.dispatch(Signal::QueryActiveChanged, &active_query(false), now);
    let inactive = Snapshot {
        query: QueryStatus {
            present: true,
            ..QueryStatus::default()
        },
        ..Snapshot::default()
    };
    sm.dispatch(Signal::QueryActiveChanged, &inactive, now);
    assert_eq!(sm.appearance(), ButtonAppearance::Hidden);
    assert_eq!(sm.next_deadline(), None);
}

#[test]
fn test_settle_delay_counts_from_first_query_change() {
    let mut sm = StateMachine::new();
    let start = Instant::now();
    sm.dispatch(Signal::QueryHasMatches, &active_query(true), start);
    sm.dispatch(Signal::QueryChanged, &active_query(false), start);
    assert_eq!(sm.results(), ResultsState::Disabled);

    let later = start + Duration::from_millis(200);
    assert!(
        sm.dispatch(Signal::QueryChanged, &active_query(false), later)
            .iter()
            .all(|t| !matches!(t, Transition::Results { .. }))
    );
    assert_eq!(sm.results(), ResultsState::Disabled);
    sm.poll(&active_query(false), start + Duration::from_millis(250));
    assert_eq!(sm.results(), ResultsState::Hidden);
    assert!(!sm.display_delay().is_running());
}

#[test]
fn test_fallbacks_and_matches_toggle() {
    let mut sm = StateMachine::new();
    let now = Instant::now();
    let mut snapshot = active_query(true);
    snapshot.query.has_fallbacks = true;
    sm.dispatch(Signal::QueryHasMatches, &snapshot, now);
    sm.dispatch(UserEvent::ShowFallbacks.into(), &snapshot, now);
    assert_eq!(sm.results(), ResultsState::Fallbacks);
    sm.dispatch(UserEvent::HideFallbacks.into(), &snapshot, now);
    assert_eq!(sm.results(), ResultsState::Matches);

    // Without matches an active query goes back to nothing
    snapshot.query.has_matches = false;
    sm.dispatch(UserEvent::ShowFallbacks.into(), &snapshot, now);
    sm.dispatch(UserEvent::HideFallbacks.into(), &snapshot, now);
    assert_eq!(sm.results(), ResultsState::Hidden);
}
