//! Review lifecycle controller.
//!
//! [`ReviewController`] owns the state of one review submission at a time
//! and drives it through the lifecycle: validate the reference, submit it
//! to the backend, then poll for the artifact until it arrives, the
//! polling budget runs out, or a newer submission supersedes the job.
//!
//! Every state transition is broadcast via a [`tokio::sync::broadcast`]
//! channel. Call [`ReviewController::subscribe`] to receive them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;

use revlens_core::error::CoreError;
use revlens_core::reference::RepoRef;
use revlens_core::state::ReviewState;
use revlens_core::types::ReviewId;

use crate::api::ReviewBackend;
use crate::events::StateChange;

/// Broadcast channel capacity for state-change events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Tunable parameters for the artifact polling schedule.
///
/// The interval elapses before every status check, including the first,
/// so the earliest check happens one interval after polling begins.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of status checks before the review times out.
    pub max_attempts: u32,
    /// Fixed delay before each status check.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            interval: Duration::from_secs(3),
        }
    }
}

impl PollConfig {
    /// Upper bound on the time spent polling before [`ReviewState::TimedOut`].
    pub fn total_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Drives one review submission at a time through its lifecycle.
///
/// Cloning is cheap and every clone shares the same lifecycle: the same
/// current state, the same subscribers, the same supersession counter.
/// Hand a clone to whatever surface forwards submissions (a UI task, a
/// request handler) and another to whatever renders state changes.
#[derive(Clone)]
pub struct ReviewController {
    backend: Arc<dyn ReviewBackend>,
    poll: PollConfig,
    current: Arc<RwLock<CurrentJob>>,
    event_tx: broadcast::Sender<StateChange>,
}

/// Internal bookkeeping for the active lifecycle.
struct CurrentJob {
    /// Monotonic lifecycle counter. A transition is applied only while
    /// its epoch still matches, so responses that arrive after the job
    /// was superseded are discarded instead of mutating state.
    epoch: u64,
    state: ReviewState,
    /// Cancelled when the job is superseded or shut down; stops the
    /// polling loop at its next await point.
    cancel: CancellationToken,
}

impl ReviewController {
    /// Create a controller in the [`ReviewState::Idle`] state.
    pub fn new(backend: Arc<dyn ReviewBackend>, poll: PollConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            poll,
            current: Arc::new(RwLock::new(CurrentJob {
                epoch: 0,
                state: ReviewState::Idle,
                cancel: CancellationToken::new(),
            })),
            event_tx,
        }
    }

    /// Subscribe to state transitions.
    ///
    /// Each receiver independently observes every transition published
    /// after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.event_tx.subscribe()
    }

    /// The current lifecycle state.
    pub async fn state(&self) -> ReviewState {
        self.current.read().await.state.clone()
    }

    /// Submit a repository reference for analysis.
    ///
    /// The reference is validated first: an input that is empty after
    /// trimming is rejected without any network request or state change.
    /// Otherwise the controller transitions to `Submitting` immediately,
    /// supersedes any job still in flight, and drives the rest of the
    /// lifecycle on a spawned task.
    pub async fn submit(&self, reference: &str) -> Result<(), CoreError> {
        let repo = RepoRef::parse(reference)?;

        let (epoch, cancel) = {
            let mut current = self.current.write().await;
            current.epoch += 1;
            current.cancel.cancel();
            current.cancel = CancellationToken::new();
            current.state = ReviewState::Submitting;
            self.publish(&current.state);
            (current.epoch, current.cancel.clone())
        };

        tracing::info!(repo = %repo, epoch, "Submitting review");

        let controller = self.clone();
        tokio::spawn(async move {
            controller.run_lifecycle(repo, epoch, cancel).await;
        });

        Ok(())
    }

    /// Invalidate the active lifecycle without starting a new one.
    ///
    /// The polling loop stops at its next await point and any response
    /// already in flight is discarded on arrival. The visible state is
    /// left as-is; a later [`submit`](Self::submit) starts fresh.
    pub async fn shutdown(&self) {
        let mut current = self.current.write().await;
        current.epoch += 1;
        current.cancel.cancel();
        tracing::info!("Review controller shut down");
    }

    // ---- private helpers ----

    /// One full lifecycle: create the review, then poll for its artifact.
    async fn run_lifecycle(&self, repo: RepoRef, epoch: u64, cancel: CancellationToken) {
        let review_id = match self.backend.submit_review(repo.as_str()).await {
            Ok(response) => response.review_id,
            Err(e) => {
                tracing::error!(repo = %repo, error = %e, "Review submission failed");
                let failed = ReviewState::Failed {
                    reason: e.to_string(),
                };
                self.apply(epoch, failed).await;
                return;
            }
        };

        tracing::info!(repo = %repo, review_id = %review_id, "Review queued");

        let queued = ReviewState::Queued {
            review_id: review_id.clone(),
        };
        if !self.apply(epoch, queued).await {
            return;
        }

        let polling = ReviewState::Polling {
            review_id: review_id.clone(),
            attempt: 0,
        };
        if !self.apply(epoch, polling).await {
            return;
        }

        self.poll_for_artifact(review_id, epoch, cancel).await;
    }

    /// Poll until the artifact arrives, the attempt budget is exhausted,
    /// or the job is superseded.
    async fn poll_for_artifact(&self, review_id: ReviewId, epoch: u64, cancel: CancellationToken) {
        for attempt in 0..self.poll.max_attempts {
            // The interval elapses before every attempt, including the first.
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(review_id = %review_id, "Polling cancelled");
                    return;
                }
                _ = tokio::time::sleep(self.poll.interval) => {}
            }

            match self.backend.fetch_artifact(&review_id).await {
                Ok(artifact) => {
                    tracing::info!(review_id = %review_id, attempt, "Artifact ready");
                    self.apply(epoch, ReviewState::Completed { artifact }).await;
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        review_id = %review_id,
                        attempt,
                        error = %e,
                        "Artifact not ready",
                    );
                }
            }

            let completed = attempt + 1;
            if completed < self.poll.max_attempts {
                let next = ReviewState::Polling {
                    review_id: review_id.clone(),
                    attempt: completed,
                };
                if !self.apply(epoch, next).await {
                    return;
                }
            }
        }

        tracing::warn!(
            review_id = %review_id,
            attempts = self.poll.max_attempts,
            "No artifact before polling budget exhausted",
        );
        self.apply(epoch, ReviewState::TimedOut).await;
    }

    /// Apply a transition if `epoch` still identifies the active job.
    ///
    /// Returns `false` (and publishes nothing) when the job has been
    /// superseded in the meantime.
    async fn apply(&self, epoch: u64, state: ReviewState) -> bool {
        let mut current = self.current.write().await;
        if current.epoch != epoch {
            tracing::debug!(
                stale_epoch = epoch,
                current_epoch = current.epoch,
                state = %state,
                "Discarding transition from superseded lifecycle",
            );
            return false;
        }
        current.state = state;
        self.publish(&current.state);
        true
    }

    /// Publish a state change to all subscribers.
    fn publish(&self, state: &ReviewState) {
        // A send error only means there are currently no subscribers.
        let _ = self.event_tx.send(StateChange::new(state.clone()));
    }
}
