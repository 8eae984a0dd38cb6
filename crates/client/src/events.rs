//! State-change events published to controller subscribers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use revlens_core::state::ReviewState;

/// A single lifecycle transition, broadcast to every subscriber.
///
/// Constructed by the controller at the moment the transition is applied,
/// so `at` reflects when observers were notified.
#[derive(Debug, Clone, Serialize)]
pub struct StateChange {
    /// The state the lifecycle just entered.
    pub state: ReviewState,

    /// When the transition occurred (UTC).
    pub at: DateTime<Utc>,
}

impl StateChange {
    /// Create an event for `state`, stamped with the current time.
    pub fn new(state: ReviewState) -> Self {
        Self {
            state,
            at: Utc::now(),
        }
    }
}
