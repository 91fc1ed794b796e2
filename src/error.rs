use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("cannot access '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed row at line {line}: expected 4 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("JSON serialization error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl CleanerError {
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CleanerError::FileAccess {
            path: path.into(),
            source,
        }
    }
}
