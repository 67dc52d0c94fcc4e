//! On-disk placement of series, symbol lists and expiry indexes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tickroll_aggregate::{BatchExpiry, ExpiryIndex};
use tickroll_types::{InstrumentKind, TickerIdentity, Timeframe};

use crate::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, SeriesDocument,
    SymbolsDocument, write_json_file,
};

#[cfg(feature = "parquet")]
use crate::ParquetFormatter;

const SYMBOLS_FILE: &str = "symbols.json";
const EXPIRIES_FILE: &str = "expiries.json";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// How output files are grouped under the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    /// `{root}/{expiry}/{ticker}_{label}.{ext}`, one `expiries.json` at the root.
    #[default]
    ByExpiry,
    /// `{root}/{kind}/{underlying}/{expiry}/{ticker}/{label}.{ext}`, one
    /// `expiries.json` per derivative underlying.
    ByKind,
}

impl LayoutStyle {
    /// Returns the style name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ByExpiry => "by-expiry",
            Self::ByKind => "by-kind",
        }
    }
}

impl std::fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LayoutStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "by-expiry" | "expiry" => Ok(Self::ByExpiry),
            "by-kind" | "kind" => Ok(Self::ByKind),
            _ => Err(FormatError::UnknownLayout(s.to_string())),
        }
    }
}

/// Writes rollup output under a root directory.
///
/// Remembers which derivative expiries it has written so the by-kind
/// expiry lists can be produced at the end.
#[derive(Debug)]
pub struct OutputLayout {
    root: PathBuf,
    style: LayoutStyle,
    format: OutputFormat,
    expiry_lists: BTreeMap<PathBuf, BTreeSet<NaiveDate>>,
}

impl OutputLayout {
    /// Creates a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, style: LayoutStyle, format: OutputFormat) -> Self {
        Self {
            root: root.into(),
            style,
            format,
            expiry_lists: BTreeMap::new(),
        }
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the grouping style.
    #[must_use]
    pub const fn style(&self) -> LayoutStyle {
        self.style
    }

    /// Returns the series file format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the directory holding `identity`'s files for `expiry`.
    #[must_use]
    pub fn group_dir(&self, identity: &TickerIdentity, expiry: NaiveDate) -> PathBuf {
        let date = expiry.format(DATE_FORMAT).to_string();
        match self.style {
            LayoutStyle::ByExpiry => self.root.join(date),
            LayoutStyle::ByKind => self.underlying_dir(identity).join(date),
        }
    }

    /// Returns the path of one series file.
    #[must_use]
    pub fn series_path(
        &self,
        identity: &TickerIdentity,
        expiry: NaiveDate,
        timeframe: Timeframe,
    ) -> PathBuf {
        let ticker = path_component(identity.raw_symbol());
        let ext = self.format.extension();
        let group = self.group_dir(identity, expiry);
        match self.style {
            LayoutStyle::ByExpiry => group.join(format!("{ticker}_{}.{ext}", timeframe.label())),
            LayoutStyle::ByKind => group
                .join(ticker)
                .join(format!("{}.{ext}", timeframe.label())),
        }
    }

    fn underlying_dir(&self, identity: &TickerIdentity) -> PathBuf {
        let kind = match identity.kind() {
            InstrumentKind::Spot => "spot",
            InstrumentKind::Future => "futures",
            InstrumentKind::Option { .. } => "options",
        };
        self.root
            .join(kind)
            .join(path_component(identity.underlying()))
    }

    /// Writes one series file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not compiled in or the file cannot
    /// be written.
    pub fn write_series(
        &mut self,
        identity: &TickerIdentity,
        expiry: NaiveDate,
        timeframe: Timeframe,
        series: &SeriesDocument,
    ) -> Result<PathBuf, FormatError> {
        if !cfg!(feature = "parquet") && self.format == OutputFormat::Parquet {
            return Err(FormatError::UnknownFormat(
                "parquet (built without the parquet feature)".to_string(),
            ));
        }

        let path = self.series_path(identity, expiry, timeframe);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&path)?);
        match self.format {
            OutputFormat::Json => JsonFormatter::new().write_series(series, &mut writer)?,
            OutputFormat::Ndjson => JsonFormatter::ndjson().write_series(series, &mut writer)?,
            OutputFormat::Csv => CsvFormatter::new().write_series(series, &mut writer)?,
            #[cfg(feature = "parquet")]
            OutputFormat::Parquet => ParquetFormatter::new().write_series(series, &mut writer)?,
            #[cfg(not(feature = "parquet"))]
            OutputFormat::Parquet => {}
        }
        writer.flush()?;

        if self.style == LayoutStyle::ByKind && identity.is_derivative() {
            let dir = self.underlying_dir(identity);
            self.expiry_lists.entry(dir).or_default().insert(expiry);
        }

        tracing::debug!(path = %path.display(), buckets = series.data.len(), "wrote series");
        Ok(path)
    }

    /// Writes a `symbols.json` into every group directory `identities` fall in.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn write_symbols<'a, I>(
        &self,
        identities: I,
        expiry: &BatchExpiry,
    ) -> Result<Vec<PathBuf>, FormatError>
    where
        I: IntoIterator<Item = &'a TickerIdentity>,
    {
        let mut groups: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
        for identity in identities {
            groups
                .entry(self.group_dir(identity, expiry.date))
                .or_default()
                .push(identity.raw_symbol().to_string());
        }

        let mut written = Vec::with_capacity(groups.len());
        for (dir, symbols) in groups {
            let path = dir.join(SYMBOLS_FILE);
            write_json_file(&path, &SymbolsDocument::new(expiry.date, expiry.kind, symbols))?;
            written.push(path);
        }
        Ok(written)
    }

    /// Writes the expiry index.
    ///
    /// By expiry, this is one `expiries.json` mapping each underlying to its
    /// dated expiry kinds. By kind, each derivative underlying directory gets
    /// an `expiries.json` listing the dates written under it.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub fn write_expiry_index(&self, index: &ExpiryIndex) -> Result<Vec<PathBuf>, FormatError> {
        match self.style {
            LayoutStyle::ByExpiry => {
                let path = self.root.join(EXPIRIES_FILE);
                write_json_file(&path, &index.to_document())?;
                Ok(vec![path])
            }
            LayoutStyle::ByKind => {
                let mut written = Vec::with_capacity(self.expiry_lists.len());
                for (dir, dates) in &self.expiry_lists {
                    let dates: Vec<String> = dates
                        .iter()
                        .map(|d| d.format(DATE_FORMAT).to_string())
                        .collect();
                    let path = dir.join(EXPIRIES_FILE);
                    write_json_file(&path, &dates)?;
                    written.push(path);
                }
                Ok(written)
            }
        }
    }
}

/// Makes a symbol safe to use as a single path component.
///
/// Separators become `_`, and names that would not name a child directory
/// (empty, `.` or `..`) have every character replaced with `_`.
fn path_component(name: &str) -> String {
    match name {
        "" => "_".to_string(),
        "." | ".." => "_".repeat(name.len()),
        _ => name.replace(['/', '\\'], "_"),
    }
}
