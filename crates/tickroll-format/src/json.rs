//! JSON output format.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tickroll_aggregate::OhlcBucket;

use crate::{FormatError, Formatter, SeriesDocument};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// A single JSON value.
    #[default]
    Document,
    /// Newline-delimited JSON (NDJSON/JSONL), one bucket per line.
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for document style).
    pretty: bool,
}

/// One NDJSON line of a series.
#[derive(Serialize)]
struct SeriesLine<'a> {
    ticker: &'a str,
    #[serde(flatten)]
    bucket: OhlcBucket,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (document style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Document,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (document style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_value<T: Serialize + ?Sized, W: Write>(
        &self,
        value: &T,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_buckets<W: Write + Send>(
        &self,
        buckets: &[OhlcBucket],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Document => {
                let rows: Vec<_> = buckets.iter().map(OhlcBucket::as_tuple).collect();
                self.write_value(&rows, writer)?;
            }
            JsonStyle::Ndjson => {
                for bucket in buckets {
                    serde_json::to_writer(&mut writer, bucket)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &SeriesDocument,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Document => self.write_value(series, writer)?,
            JsonStyle::Ndjson => {
                for bucket in series.buckets() {
                    let line = SeriesLine {
                        ticker: &series.ticker,
                        bucket,
                    };
                    serde_json::to_writer(&mut writer, &line)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Document => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

/// Writes `value` as compact JSON to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), FormatError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tickroll_types::{InstrumentKind, TickerIdentity, Timeframe};

    fn sample_series() -> SeriesDocument {
        let identity = TickerIdentity::new("NIFTY-FUT", "NIFTY", InstrumentKind::Future);
        let buckets = [
            OhlcBucket::new(1_614_592_800, 100.0, 106.0, 99.0, 104.0, 30, 60),
            OhlcBucket::new(1_614_593_100, 104.0, 105.0, 103.0, 103.5, 35, 12),
        ];
        let expiry = NaiveDate::from_ymd_opt(2021, 3, 25).unwrap();
        SeriesDocument::new(&identity, expiry, Timeframe::MINUTE_5, &buckets)
    }

    #[test]
    fn test_series_document() {
        let mut output = Cursor::new(Vec::new());
        JsonFormatter::new()
            .write_series(&sample_series(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with('{'));
        assert!(result.contains("\"expiryDate\":\"2021-03-25\""));
        assert!(result.contains("[1614592800,100.0,106.0,99.0,104.0,30,60]"));
    }

    #[test]
    fn test_series_ndjson() {
        let mut output = Cursor::new(Vec::new());
        JsonFormatter::ndjson()
            .write_series(&sample_series(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["ticker"], "NIFTY-FUT");
        assert_eq!(first["bucket_start"], 1_614_592_800_i64);
        assert_eq!(first["volume"], 60);
    }

    #[test]
    fn test_buckets_as_rows() {
        let mut output = Cursor::new(Vec::new());
        JsonFormatter::new()
            .write_buckets(&sample_series().buckets(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("[["));
    }

    #[test]
    fn test_pretty_json() {
        let mut output = Cursor::new(Vec::new());
        JsonFormatter::new()
            .with_pretty(true)
            .write_series(&sample_series(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("  \"ticker\""));
    }

    #[test]
    fn test_write_json_file_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/symbols.json");

        write_json_file(&path, &vec!["NIFTY"]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\"NIFTY\"]");
    }
}
