//! Repository reference parsing and validation.
//!
//! A [`RepoRef`] is the user-supplied pointer to a repository or pull
//! request, typically a URL. Validation happens before any network
//! interaction so an empty submission never produces an HTTP request.

use std::fmt;

use crate::error::CoreError;

/// A validated, trimmed reference to a repository or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef(String);

impl RepoRef {
    /// Parse a raw reference string.
    ///
    /// Surrounding whitespace is trimmed; an input that is empty after
    /// trimming is rejected with [`CoreError::Validation`].
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "Repository reference must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
