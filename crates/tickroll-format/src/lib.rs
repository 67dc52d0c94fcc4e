//! Output formatters for tickroll.
//!
//! This crate provides the documents and formatters used to write rollups:
//!
//! - [`SeriesDocument`] - One symbol at one timeframe, with its identity
//! - [`SymbolsDocument`] - The symbols of one expiry
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON document or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format
//! - [`OutputLayout`] - On-disk placement of all of the above

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod document;
mod formatter;
mod json;
mod layout;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use document::{DataRow, SeriesDocument, SymbolsDocument};
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle, write_json_file};
pub use layout::{LayoutStyle, OutputLayout};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
