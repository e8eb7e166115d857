use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Filesystem fault beyond a plain missing file. Missing and malformed
    /// inputs are absorbed by the stores; this is the fatal tier.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("card not found: {0}")]
    CardNotFound(String),

    /// The board file exists but does not parse. Surfaced instead of being
    /// overwritten, so a bad deploy can not eat the board.
    #[error("board file is corrupt: {0}")]
    Corrupt(String),

    #[error("path escapes the workspace: {0}")]
    Denied(String),

    #[error("no such file: {0}")]
    NotFound(String),
}
