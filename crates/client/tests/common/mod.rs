//! Shared helpers for revlens-client integration tests.

use std::sync::Once;
use std::time::Duration;

use tokio::sync::broadcast;

use revlens_client::controller::PollConfig;
use revlens_client::events::StateChange;
use revlens_core::state::ReviewState;

/// Initialise tracing output for tests (once per process).
///
/// Filter defaults to `revlens_client=debug`; override with `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "revlens_client=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A polling schedule short enough for tests.
pub fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig {
        max_attempts,
        interval: Duration::from_millis(10),
    }
}

/// Receive the next state change, failing the test after a deadline.
pub async fn next_event(events: &mut broadcast::Receiver<StateChange>) -> ReviewState {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for a state change")
        .expect("event channel closed")
        .state
}

/// Collect states until a terminal one arrives (inclusive).
pub async fn collect_until_terminal(
    events: &mut broadcast::Receiver<StateChange>,
) -> Vec<ReviewState> {
    let mut states = Vec::new();
    loop {
        let state = next_event(events).await;
        let terminal = state.is_terminal();
        states.push(state);
        if terminal {
            return states;
        }
    }
}
