//! Revlens client library.
//!
//! Talks to the remote code-review analysis service and drives the
//! lifecycle of one review at a time:
//!
//! - [`ReviewApi`] — REST wrapper for the backend's submit and artifact
//!   endpoints, behind the [`ReviewBackend`] trait.
//! - [`ReviewController`] — owns the submit/poll state machine and
//!   broadcasts every transition as a [`StateChange`].
//! - [`BackendConfig`] — endpoint and credential configuration.

pub mod api;
pub mod config;
pub mod controller;
pub mod events;

pub use api::{ReviewApi, ReviewApiError, ReviewBackend, SubmitResponse};
pub use config::BackendConfig;
pub use controller::{PollConfig, ReviewController};
pub use events::StateChange;
