//! Concurrent batch loading.

use futures::stream::{self, Stream, StreamExt};

use crate::{BatchFile, IngestError, Row, read_rows};

/// The rows of one batch file.
#[derive(Debug, Clone)]
pub struct LoadedBatch {
    /// The file the rows came from.
    pub file: BatchFile,
    /// The parsed rows.
    pub rows: Vec<Row>,
}

impl LoadedBatch {
    /// Creates a new loaded batch.
    #[must_use]
    pub const fn new(file: BatchFile, rows: Vec<Row>) -> Self {
        Self { file, rows }
    }

    /// Returns true if the file had no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Creates an async stream of loaded batches.
///
/// Up to `concurrency` files are read at once. Batches are yielded in the
/// order of `files` regardless of which read finishes first.
pub fn batch_stream(
    files: Vec<BatchFile>,
    concurrency: usize,
) -> impl Stream<Item = Result<LoadedBatch, IngestError>> {
    stream::iter(files)
        .map(|file| async move {
            let rows = read_rows(&file.path).await?;
            Ok(LoadedBatch::new(file, rows))
        })
        .buffered(concurrency.max(1))
}
