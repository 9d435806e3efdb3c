use super::{UiEvent, WindowController};
use tokio::time::Instant;
use tracing::{debug, info};

impl WindowController {
    /// Handle posted events and timers until [`UiEvent::Quit`] arrives or
    /// every sender is gone. Runs on the current thread.
    pub async fn run(&mut self) {
        info!("Window controller running");
        loop {
            let timer = sleep_until(self.machine.next_deadline());
            tokio::select! {
                event = self.rx.recv() => match event {
                    Some(UiEvent::Quit) => {
                        debug!("Quit requested");
                        break;
                    }
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("Event channel closed");
                        break;
                    }
                },
                () = timer => self.poll_timers(),
            }
        }
        info!("Window controller stopped");
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
