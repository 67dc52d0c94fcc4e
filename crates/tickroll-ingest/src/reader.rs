//! Header-keyed CSV reading.

use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::path::Path;
use tickroll_types::columns;
use tokio::io::AsyncRead;

use crate::IngestError;

/// One CSV record keyed by its header names.
pub type Row = HashMap<String, String>;

/// Reads every record of a CSV source into header-keyed rows.
///
/// Headers and fields are trimmed. Records shorter than the header simply
/// lack the trailing columns, leaving the decision to the row consumer.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumns`] if the header lacks any of
/// [`columns::REQUIRED`], or [`IngestError::Csv`] on malformed input.
pub async fn read_rows_from<R>(source: R) -> Result<Vec<Row>, IngestError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .create_reader(source);

    let headers = reader.headers().await?.clone();
    let missing: Vec<_> = columns::REQUIRED
        .into_iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns { columns: missing });
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).await? {
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Reads a CSV file into header-keyed rows.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed. Parse errors are
/// wrapped with the file path.
pub async fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>, IngestError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let rows = read_rows_from(file)
        .await
        .map_err(|e| e.in_file(path))?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "read batch file");
    Ok(rows)
}
