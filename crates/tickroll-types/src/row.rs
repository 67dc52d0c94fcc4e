//! Raw input rows and symbol selection.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Column names of the tick CSV exports.
pub mod columns {
    /// Raw ticker symbol.
    pub const TICKER: &str = "Ticker";
    /// Day-first timestamp of the observation.
    pub const DATE_TIME: &str = "Date/Time";
    /// Opening price.
    pub const OPEN: &str = "Open";
    /// High price.
    pub const HIGH: &str = "High";
    /// Low price.
    pub const LOW: &str = "Low";
    /// Closing price.
    pub const CLOSE: &str = "Close";
    /// Open interest.
    pub const OPEN_INTEREST: &str = "Open Interest";
    /// Traded volume.
    pub const VOLUME: &str = "Volume";

    /// The six numeric columns in positional order.
    pub const NUMERIC: [&str; 6] = [OPEN, HIGH, LOW, CLOSE, OPEN_INTEREST, VOLUME];

    /// Every column a row must carry.
    pub const REQUIRED: [&str; 8] = [
        TICKER,
        DATE_TIME,
        OPEN,
        HIGH,
        LOW,
        CLOSE,
        OPEN_INTEREST,
        VOLUME,
    ];
}

/// A parsed input row: a mapping from column name to string value.
pub trait RawRow {
    /// Returns the value of the named column, if present.
    fn field(&self, column: &str) -> Option<&str>;
}

impl<S: BuildHasher> RawRow for HashMap<String, String, S> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl RawRow for BTreeMap<String, String> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl<R: RawRow + ?Sized> RawRow for &R {
    fn field(&self, column: &str) -> Option<&str> {
        (**self).field(column)
    }
}

/// Predicate deciding which raw symbols are of interest for a batch.
pub trait SymbolFilter {
    /// Returns true if rows for `symbol` should be kept.
    fn accepts(&self, symbol: &str) -> bool;
}

impl<F> SymbolFilter for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, symbol: &str) -> bool {
        self(symbol)
    }
}
