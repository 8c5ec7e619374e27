use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the book store. None of them are retried here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book store is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read seed file {path}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode seed file {path}")]
    SeedDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
