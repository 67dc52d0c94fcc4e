//! Ingestion errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while finding and reading batch files.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Filesystem error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// The header row lacks required columns.
    #[error("Missing columns: {}", columns.join(", "))]
    MissingColumns {
        /// The absent column names.
        columns: Vec<&'static str>,
    },

    /// An error while reading a specific file.
    #[error("{}: {source}", path.display())]
    InFile {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<Self>,
    },
}

impl IngestError {
    /// Wraps an error with the file it occurred in.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            already @ (Self::Io { .. } | Self::InFile { .. }) => already,
            other => Self::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_file_wraps_once() {
        let err = IngestError::MissingColumns {
            columns: vec!["Ticker", "Volume"],
        }
        .in_file("a.csv")
        .in_file("b.csv");

        assert_eq!(err.to_string(), "a.csv: Missing columns: Ticker, Volume");
    }
}
