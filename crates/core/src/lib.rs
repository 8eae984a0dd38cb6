//! Revlens domain model.
//!
//! This crate holds the pure building blocks of the review pipeline:
//!
//! - [`RepoRef`] — validated repository/PR reference.
//! - [`ReviewState`] — lifecycle state machine for one review.
//! - [`Artifact`] — opaque analysis result document.
//! - [`CoreError`] — domain-level errors.
//!
//! No I/O happens here; the HTTP client and the lifecycle controller
//! live in `revlens-client`.

pub mod error;
pub mod reference;
pub mod state;
pub mod types;

pub use error::CoreError;
pub use reference::RepoRef;
pub use state::ReviewState;
pub use types::{Artifact, ReviewId};
