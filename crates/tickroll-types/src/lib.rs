//! Core types for tickroll.
//!
//! This crate provides the vocabulary shared by every tickroll crate:
//!
//! - [`TickRecord`] - One observation of an instrument at one instant
//! - [`TickerIdentity`] - Structured meaning of a raw ticker symbol
//! - [`Timeframe`] - Width of an OHLC rollup bucket
//! - [`LocalZone`] - Zone that input timestamps are expressed in
//! - [`ExpiryKind`] - Weekly or monthly contract expiry

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickroll/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod expiry;
mod instrument;
mod row;
mod tick;
mod timeframe;
mod zone;

pub use error::{Result, TickrollError};
pub use expiry::ExpiryKind;
pub use instrument::{InstrumentKind, OptionType, TickerIdentity};
pub use row::{RawRow, SymbolFilter, columns};
pub use tick::TickRecord;
pub use timeframe::{Timeframe, TimeframeParseError};
pub use zone::{LocalZone, ZoneParseError};
