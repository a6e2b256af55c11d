// src/error.rs

use std::fmt;

/// Startup failures of the finals loader.
///
/// These travel inside an `anyhow::Error` chain, either as context on the
/// underlying transport error or as the root message, so callers that care
/// about the kind can `downcast_ref::<LoadError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source page could not be retrieved.
    Fetch { url: String },
    /// No table on the page has the finals shape, or a row broke an invariant.
    Parse { reason: String },
}

impl LoadError {
    pub fn parse(reason: impl Into<String>) -> Self {
        LoadError::Parse {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Fetch { url } => write!(f, "failed to fetch finals page {}", url),
            LoadError::Parse { reason } => write!(f, "failed to parse finals table: {}", reason),
        }
    }
}
