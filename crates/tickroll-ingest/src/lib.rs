//! Async CSV ingestion for tickroll.
//!
//! - [`discover_batches`] - Find batch files under input roots
//! - [`read_rows`] - Parse one CSV file into rows
//! - [`batch_stream`] - Read batches concurrently, in order

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod discover;
mod error;
mod reader;
mod stream;

pub use discover::{BatchFile, discover_batches, parse_file_date};
pub use error::IngestError;
pub use reader::{Row, read_rows, read_rows_from};
pub use stream::{LoadedBatch, batch_stream};
