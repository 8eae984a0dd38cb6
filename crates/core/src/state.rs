//! Review lifecycle state machine.
//!
//! [`ReviewState`] is the single value observers render. One submission
//! moves through it strictly forward:
//!
//! `Idle -> Submitting -> Queued -> Polling(0..) -> Completed | TimedOut`
//!
//! with `Failed` reachable from `Submitting` when the backend rejects the
//! submission. Terminal states are only left when a new submission starts
//! a fresh lifecycle. Transitions are driven exclusively by the controller
//! in `revlens-client`.

use std::fmt;

use serde::Serialize;

use crate::types::{Artifact, ReviewId};

/// Lifecycle phase of one review submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ReviewState {
    /// No submission has been made yet.
    Idle,

    /// The creation request is in flight.
    Submitting,

    /// The backend accepted the submission and assigned an id.
    Queued { review_id: ReviewId },

    /// Waiting for the artifact. `attempt` counts status checks already
    /// performed, so the state enters at 0 before the first request.
    Polling { review_id: ReviewId, attempt: u32 },

    /// The artifact arrived.
    Completed { artifact: Artifact },

    /// The submission was rejected or the request itself failed.
    Failed { reason: String },

    /// The polling budget was exhausted without an artifact.
    TimedOut,
}

impl ReviewState {
    /// True once the lifecycle has ended; the state will not change again
    /// until a new submission begins.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed { .. } | Self::TimedOut
        )
    }

    /// True while a submission or poll sequence is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Submitting | Self::Queued { .. } | Self::Polling { .. }
        )
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Submitting => f.write_str("Queueing job..."),
            Self::Queued { .. } => f.write_str("Analyzing repository..."),
            Self::Polling { .. } => f.write_str("Waiting for results..."),
            Self::Completed { .. } => f.write_str("Completed"),
            Self::Failed { reason } => write!(f, "Error: {reason}"),
            Self::TimedOut => f.write_str("Timeout: no response after waiting"),
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_artifact() -> Artifact {
        Artifact::new(json!({"summary": "looks good"}))
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ReviewState::Idle.is_terminal());
        assert!(!ReviewState::Submitting.is_terminal());
        assert!(!ReviewState::Queued {
            review_id: "r1".to_string()
        }
        .is_terminal());
        assert!(!ReviewState::Polling {
            review_id: "r1".to_string(),
            attempt: 5
        }
        .is_terminal());

        assert!(ReviewState::Completed {
            artifact: sample_artifact()
        }
        .is_terminal());
        assert!(ReviewState::Failed {
            reason: "boom".to_string()
        }
        .is_terminal());
        assert!(ReviewState::TimedOut.is_terminal());
    }

    #[test]
    fn test_in_flight_states() {
        assert!(!ReviewState::Idle.is_in_flight());
        assert!(ReviewState::Submitting.is_in_flight());
        assert!(ReviewState::Queued {
            review_id: "r1".to_string()
        }
        .is_in_flight());
        assert!(ReviewState::Polling {
            review_id: "r1".to_string(),
            attempt: 0
        }
        .is_in_flight());
        assert!(!ReviewState::TimedOut.is_in_flight());
    }

    #[test]
    fn test_no_state_is_both_terminal_and_in_flight() {
        let states = [
            ReviewState::Idle,
            ReviewState::Submitting,
            ReviewState::Queued {
                review_id: "r1".to_string(),
            },
            ReviewState::Polling {
                review_id: "r1".to_string(),
                attempt: 3,
            },
            ReviewState::Completed {
                artifact: sample_artifact(),
            },
            ReviewState::Failed {
                reason: "boom".to_string(),
            },
            ReviewState::TimedOut,
        ];
        for state in states {
            assert!(
                !(state.is_terminal() && state.is_in_flight()),
                "state {state:?} is both terminal and in flight"
            );
        }
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(ReviewState::Idle.to_string(), "Idle");
        assert_eq!(ReviewState::Submitting.to_string(), "Queueing job...");
        assert_eq!(
            ReviewState::Queued {
                review_id: "r1".to_string()
            }
            .to_string(),
            "Analyzing repository..."
        );
        assert_eq!(
            ReviewState::Polling {
                review_id: "r1".to_string(),
                attempt: 7
            }
            .to_string(),
            "Waiting for results..."
        );
        assert_eq!(
            ReviewState::Completed {
                artifact: sample_artifact()
            }
            .to_string(),
            "Completed"
        );
        assert_eq!(
            ReviewState::Failed {
                reason: "Backend error (500): oops".to_string()
            }
            .to_string(),
            "Error: Backend error (500): oops"
        );
        assert_eq!(
            ReviewState::TimedOut.to_string(),
            "Timeout: no response after waiting"
        );
    }

    #[test]
    fn test_serializes_with_phase_tag() {
        let polling = ReviewState::Polling {
            review_id: "abc".to_string(),
            attempt: 3,
        };
        assert_eq!(
            serde_json::to_value(&polling).unwrap(),
            json!({"phase": "polling", "review_id": "abc", "attempt": 3})
        );

        assert_eq!(
            serde_json::to_value(ReviewState::TimedOut).unwrap(),
            json!({"phase": "timed_out"})
        );

        let completed = ReviewState::Completed {
            artifact: sample_artifact(),
        };
        assert_eq!(
            serde_json::to_value(&completed).unwrap(),
            json!({"phase": "completed", "artifact": {"summary": "looks good"}})
        );
    }
}
