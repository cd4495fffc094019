use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while reading or writing the history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("history file {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("history lock poisoned")]
    Poisoned,
}
