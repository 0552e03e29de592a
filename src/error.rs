use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the time expression parser. Both variants carry the segment
/// that failed to match so the message can be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed offset {0:?}; valid examples: +5m, +2h, +1d")]
    MalformedOffset(String),

    #[error("malformed time of day {0:?}; valid examples: @09, @14:30")]
    MalformedTimeOfDay(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("fail to access reminder store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fail to decode reminders: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("fail to encode reminders: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
