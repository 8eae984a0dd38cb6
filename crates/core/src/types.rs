use serde::{Deserialize, Serialize};

/// Identifier assigned by the analysis service when a review is queued.
///
/// Opaque to this crate; the backend chooses the format.
pub type ReviewId = String;

/// The analysis result document returned by the backend.
///
/// Carried as raw JSON: the pipeline never interprets the payload, it only
/// hands it to observers once the review completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact(serde_json::Value);

impl Artifact {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Render the artifact as indented JSON for display surfaces.
    pub fn to_string_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).expect("JSON value is always serialisable")
    }
}

impl From<serde_json::Value> for Artifact {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
