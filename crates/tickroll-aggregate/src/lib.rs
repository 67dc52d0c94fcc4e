//! OHLC aggregation for tickroll.
//!
//! This crate turns a batch of tick rows into time-bucketed rollups:
//!
//! - [`ColumnarIndex`] - Per-instant view of a batch, keyed by symbol
//! - [`OhlcAggregator`] - Streaming per-symbol bucket folding
//! - [`OhlcBucket`] - One rollup bucket
//! - [`BatchExpiry`] / [`ExpiryIndex`] - Expiry detection and bookkeeping

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bucket;
mod expiry;
mod index;

pub use aggregator::{OhlcAggregator, aggregate, bucket_start};
pub use bucket::OhlcBucket;
pub use expiry::{BatchExpiry, ExpiryIndex, ExpiryPolicy, FixedExpiry, TradingDayCount};
pub use index::{
    BuildOptions, BuildStats, ColumnarIndex, DuplicatePolicy, IndexBuild, RowErrorPolicy,
};
