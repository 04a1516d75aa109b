//! Error types for the season recap core.
//!
//! The state machines themselves never fail: guarded operations are silent
//! no-ops. Errors only come from loading host-supplied data and settings.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RecapError {
    /// Dataset JSON could not be decoded.
    #[error("Dataset parse error: {reason}")]
    DatasetParse { reason: String },

    /// Dataset decoded but violates an invariant (empty or duplicate tags).
    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    /// A timing or sizing field in the config is unusable.
    #[error("Invalid config field `{field}`: {value}")]
    InvalidConfig { field: String, value: f64 },
}

impl From<serde_json::Error> for RecapError {
    fn from(err: serde_json::Error) -> Self {
        RecapError::DatasetParse {
            reason: err.to_string(),
        }
    }
}

pub type RecapResult<T> = Result<T, RecapError>;
