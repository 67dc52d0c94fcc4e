//! Batch file discovery.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tickroll_types::ExpiryKind;

use crate::IngestError;

/// A CSV batch file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchFile {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Expiry kind stated by a `weekly/` or `monthly/` parent folder.
    pub expiry_hint: Option<ExpiryKind>,
    /// Date encoded in a `DDMMYYYY.csv` file name.
    pub file_date: Option<NaiveDate>,
}

impl BatchFile {
    /// Describes a file, reading the hint and date from its path.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let expiry_hint = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .and_then(ExpiryKind::from_dir_name);
        let file_date = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(parse_file_date);

        Self {
            path,
            expiry_hint,
            file_date,
        }
    }

    /// Returns the file name for display.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Parses a `DDMMYYYY` file stem such as `24022022`.
#[must_use]
pub fn parse_file_date(stem: &str) -> Option<NaiveDate> {
    if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stem, "%d%m%Y").ok()
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

async fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_err = |source: std::io::Error| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        paths.push(entry.path());
    }
    Ok(paths)
}

/// Finds CSV batch files under the given roots.
///
/// Each root may be a CSV file or a directory. Directories contribute their
/// own CSV files plus those of `weekly/` and `monthly/` subfolders, which also
/// set [`BatchFile::expiry_hint`]. Results are sorted by path and deduplicated.
///
/// # Errors
///
/// Returns an error if a root or folder cannot be read.
pub async fn discover_batches<P: AsRef<Path>>(roots: &[P]) -> Result<Vec<BatchFile>, IngestError> {
    let mut files = Vec::new();

    for root in roots {
        let root = root.as_ref();
        let metadata = tokio::fs::metadata(root)
            .await
            .map_err(|source| IngestError::Io {
                path: root.to_path_buf(),
                source,
            })?;

        if metadata.is_file() {
            files.push(BatchFile::from_path(root));
            continue;
        }

        for path in list_dir(root).await? {
            if path.is_dir() {
                let is_expiry_folder = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(ExpiryKind::from_dir_name)
                    .is_some();
                if is_expiry_folder {
                    files.extend(
                        list_dir(&path)
                            .await?
                            .into_iter()
                            .filter(|p| is_csv(p))
                            .map(BatchFile::from_path),
                    );
                }
            } else if is_csv(&path) {
                files.push(BatchFile::from_path(path));
            }
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(roots = roots.len(), files = files.len(), "discovered batch files");
    Ok(files)
}
