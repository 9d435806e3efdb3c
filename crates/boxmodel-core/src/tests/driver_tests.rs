//! The async driver loop.

use super::fixtures::{FakeQuery, bind, make_item, window};
use crate::controller::UiEvent;
use crate::statemachine::{ButtonAppearance, ResultsState};
use std::rc::Rc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_run_fires_timers_until_quit() {
    let mut w = window().build();
    let q = Rc::new(FakeQuery::new(1));
    bind(&mut w.controller, &q);

    let tx = w.controller.sender();
    let quit_later = async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        tx.send(UiEvent::Quit).unwrap();
    };
    tokio::join!(w.controller.run(), quit_later);

    assert_eq!(
        w.controller.state_machine().appearance(),
        ButtonAppearance::Highlighted
    );
    assert_eq!(w.controller.state_machine().next_deadline(), None);
}

#[tokio::test(start_paused = true)]
async fn test_run_handles_posted_events_in_order() {
    let mut w = window().build();
    let tx = w.controller.sender();
    tx.send(UiEvent::ThemeChanged { dark_mode: true }).unwrap();
    tx.send(UiEvent::Quit).unwrap();
    tx.send(UiEvent::ThemeChanged { dark_mode: false }).unwrap();

    w.controller.run().await;
    assert!(w.controller.dark_mode());
}

#[tokio::test(start_paused = true)]
async fn test_run_delivers_query_notifications() {
    let mut w = window().build();
    let q = Rc::new(FakeQuery::new(1));
    bind(&mut w.controller, &q);

    let tx = w.controller.sender();
    let producer = {
        let q = Rc::clone(&q);
        async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            q.add_match(make_item("alpha", &[]));
            tokio::time::sleep(Duration::from_millis(10)).await;
            tx.send(UiEvent::Quit).unwrap();
        }
    };
    tokio::join!(w.controller.run(), producer);

    assert_eq!(
        w.controller.state_machine().results(),
        ResultsState::Matches
    );
    assert_eq!(w.controller.results().count(), 1);
}
