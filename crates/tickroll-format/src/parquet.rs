//! Apache Parquet output format.

use arrow::array::{Float64Array, Int64Array, StringArray, TimestampSecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;
use tickroll_aggregate::OhlcBucket;

use crate::{FormatError, Formatter, SeriesDocument};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    fn bucket_fields() -> Vec<Field> {
        vec![
            Field::new(
                "timestamp",
                DataType::Timestamp(TimeUnit::Second, Some("UTC".into())),
                false,
            ),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("open_interest", DataType::Int64, false),
            Field::new("volume", DataType::Int64, false),
        ]
    }

    /// Creates the Arrow schema for bare buckets.
    fn bucket_schema() -> Schema {
        Schema::new(Self::bucket_fields())
    }

    /// Creates the Arrow schema for a series: the bucket columns plus the ticker.
    fn series_schema() -> Schema {
        let mut fields = vec![Field::new("ticker", DataType::Utf8, false)];
        fields.extend(Self::bucket_fields());
        Schema::new(fields)
    }

    /// Converts buckets to an Arrow RecordBatch, optionally tagged with a ticker.
    fn to_batch(buckets: &[OhlcBucket], ticker: Option<&str>) -> Result<RecordBatch, FormatError> {
        let starts: Vec<_> = buckets.iter().map(|b| b.bucket_start).collect();
        let opens: Vec<_> = buckets.iter().map(|b| b.open).collect();
        let highs: Vec<_> = buckets.iter().map(|b| b.high).collect();
        let lows: Vec<_> = buckets.iter().map(|b| b.low).collect();
        let closes: Vec<_> = buckets.iter().map(|b| b.close).collect();
        let open_interest: Vec<_> = buckets.iter().map(|b| b.open_interest).collect();
        let volumes: Vec<_> = buckets.iter().map(|b| b.volume).collect();

        let mut columns: Vec<arrow::array::ArrayRef> = vec![
            Arc::new(TimestampSecondArray::from(starts).with_timezone("UTC")),
            Arc::new(Float64Array::from(opens)),
            Arc::new(Float64Array::from(highs)),
            Arc::new(Float64Array::from(lows)),
            Arc::new(Float64Array::from(closes)),
            Arc::new(Int64Array::from(open_interest)),
            Arc::new(Int64Array::from(volumes)),
        ];
        let schema = match ticker {
            Some(ticker) => {
                let tickers = StringArray::from(vec![ticker; buckets.len()]);
                columns.insert(0, Arc::new(tickers));
                Self::series_schema()
            }
            None => Self::bucket_schema(),
        };

        RecordBatch::try_new(Arc::new(schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn write_batches<W: Write + Send>(
        &self,
        buckets: &[OhlcBucket],
        ticker: Option<&str>,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(if ticker.is_some() {
            Self::series_schema()
        } else {
            Self::bucket_schema()
        });
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in buckets.chunks(self.row_group_size) {
            let batch = Self::to_batch(chunk, ticker)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_buckets<W: Write + Send>(
        &self,
        buckets: &[OhlcBucket],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(buckets, None, writer)
    }

    fn write_series<W: Write + Send>(
        &self,
        series: &SeriesDocument,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_batches(&series.buckets(), Some(&series.ticker), writer)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Vec<OhlcBucket> {
        vec![
            OhlcBucket::new(1_614_573_000, 100.0, 106.0, 99.0, 104.0, 30, 60),
            OhlcBucket::new(1_614_573_300, 104.0, 105.0, 101.0, 102.0, 31, 7),
        ]
    }

    #[test]
    fn test_parquet_buckets() {
        let mut output = Cursor::new(Vec::new());
        ParquetFormatter::new()
            .write_buckets(&sample(), &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_batch_with_ticker() {
        let batch = ParquetFormatter::to_batch(&sample(), Some("NIFTY-FUT")).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 8);
        assert_eq!(batch.schema().field(0).name(), "ticker");
    }

    #[test]
    fn test_bucket_schema() {
        let schema = ParquetFormatter::bucket_schema();
        assert_eq!(schema.fields().len(), 7);
        assert!(schema.field_with_name("open_interest").is_ok());
        assert!(schema.field_with_name("volume").is_ok());
    }
}
