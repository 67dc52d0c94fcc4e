//! CSV output format.

use std::io::Write;
use tickroll_aggregate::OhlcBucket;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

impl Formatter for CsvFormatter {
    fn write_buckets<W: Write + Send>(
        &self,
        buckets: &[OhlcBucket],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "timestamp{d}open{d}high{d}low{d}close{d}open_interest{d}volume"
            )?;
        }

        for bucket in buckets {
            let timestamp = bucket.start_time().map_or_else(
                || bucket.bucket_start.to_string(),
                |t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            );
            writeln!(
                writer,
                "{timestamp}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bucket.open,
                bucket.high,
                bucket.low,
                bucket.close,
                bucket.open_interest,
                bucket.volume
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Vec<OhlcBucket> {
        // 2021-03-01 04:30:00 UTC
        vec![OhlcBucket::new(1_614_573_000, 100.0, 106.0, 99.0, 104.5, 30, 60)]
    }

    #[test]
    fn test_csv_buckets() {
        let mut output = Cursor::new(Vec::new());
        CsvFormatter::new()
            .write_buckets(&sample(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp,open,high,low,close,open_interest,volume"
        );
        assert_eq!(lines[1], "2021-03-01T04:30:00Z,100,106,99,104.5,30,60");
    }

    #[test]
    fn test_csv_no_header() {
        let mut output = Cursor::new(Vec::new());
        CsvFormatter::new()
            .with_header(false)
            .write_buckets(&sample(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("timestamp"));
    }

    #[test]
    fn test_custom_delimiter() {
        let mut output = Cursor::new(Vec::new());
        CsvFormatter::new()
            .with_delimiter('\t')
            .write_buckets(&sample(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("timestamp\topen\thigh"));
    }
}
