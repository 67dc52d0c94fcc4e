//! Ticker classification for tickroll.
//!
//! This crate parses raw ticker symbols and decides which of them a batch keeps:
//!
//! - [`classify`] - Raw symbol to [`TickerIdentity`](tickroll_types::TickerIdentity)
//! - [`AllowList`] - Case-insensitive symbol selector
//! - [`Profile`] - Named allow-list presets
//! - [`ClassifierCache`] - Per-batch memoization of identities

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod classifier;
mod filter;

pub use cache::ClassifierCache;
pub use classifier::{classify, normalize_weekly, underlying_of};
pub use filter::{AllowList, Profile, ProfileParseError};
