//! OHLC rollup bucket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fixed-width rollup of a symbol's ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBucket {
    /// Bucket start in epoch seconds, a multiple of the bucket width.
    pub bucket_start: i64,
    /// Open of the first tick in the bucket.
    pub open: f64,
    /// Highest high in the bucket.
    pub high: f64,
    /// Lowest low in the bucket.
    pub low: f64,
    /// Close of the last tick in the bucket.
    pub close: f64,
    /// Open interest of the last tick in the bucket.
    pub open_interest: i64,
    /// Total volume traded in the bucket.
    pub volume: i64,
}

impl OhlcBucket {
    /// Creates a new bucket.
    #[must_use]
    pub const fn new(
        bucket_start: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        open_interest: i64,
        volume: i64,
    ) -> Self {
        Self {
            bucket_start,
            open,
            high,
            low,
            close,
            open_interest,
            volume,
        }
    }

    /// Returns `[bucket_start, open, high, low, close, open_interest, volume]`.
    #[must_use]
    pub const fn to_row(&self) -> [f64; 7] {
        [
            self.bucket_start as f64,
            self.open,
            self.high,
            self.low,
            self.close,
            self.open_interest as f64,
            self.volume as f64,
        ]
    }

    /// Returns the same order as [`to_row`](Self::to_row) with the integer
    /// fields kept as integers.
    #[must_use]
    pub const fn as_tuple(&self) -> (i64, f64, f64, f64, f64, i64, i64) {
        (
            self.bucket_start,
            self.open,
            self.high,
            self.low,
            self.close,
            self.open_interest,
            self.volume,
        )
    }

    /// Returns the bucket start as a UTC date-time.
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.bucket_start, 0)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if the bucket closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the bucket closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}
