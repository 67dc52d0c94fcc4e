//! Ticker classification and time-bucketed OHLC rollups for tick CSV exports.
//!
//! This is a facade crate that re-exports functionality from the tickroll
//! workspace crates, and hosts the batch pipeline that chains them.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{BatchOutput, BatchProcessor, SymbolSeries};

// Re-export core types
pub use tickroll_types::*;

// Re-export classification
pub use tickroll_classify::{
    AllowList, ClassifierCache, Profile, ProfileParseError, classify, normalize_weekly,
    underlying_of,
};

// Re-export aggregation
pub use tickroll_aggregate::{
    BatchExpiry, BuildOptions, BuildStats, ColumnarIndex, DuplicatePolicy, ExpiryIndex,
    ExpiryPolicy, FixedExpiry, IndexBuild, OhlcAggregator, OhlcBucket, RowErrorPolicy,
    TradingDayCount, aggregate, bucket_start,
};

// Re-export formatters
pub use tickroll_format::{
    CsvFormatter, DataRow, FormatError, Formatter, JsonFormatter, JsonStyle, LayoutStyle,
    OutputFormat, OutputLayout, SeriesDocument, SymbolsDocument, write_json_file,
};

#[cfg(feature = "parquet")]
pub use tickroll_format::ParquetFormatter;

// Re-export ingestion
pub use tickroll_ingest::{
    BatchFile, IngestError, LoadedBatch, Row, batch_stream, discover_batches, parse_file_date,
    read_rows, read_rows_from,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickroll_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickroll_types::{
        ExpiryKind, InstrumentKind, LocalZone, OptionType, Result, TickRecord, TickerIdentity,
        Timeframe, TickrollError,
    };

    pub use tickroll_classify::{AllowList, Profile, classify, underlying_of};

    pub use tickroll_aggregate::{
        BatchExpiry, ColumnarIndex, ExpiryIndex, OhlcAggregator, OhlcBucket, aggregate,
    };

    pub use tickroll_format::{
        Formatter, LayoutStyle, OutputFormat, OutputLayout, SeriesDocument, SymbolsDocument,
    };

    pub use tickroll_ingest::{BatchFile, LoadedBatch, batch_stream, discover_batches};

    pub use crate::{BatchOutput, BatchProcessor, PipelineConfig};
}
