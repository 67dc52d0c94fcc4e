//! Streaming tick-to-OHLC aggregation.

use std::collections::BTreeSet;

use tickroll_types::{Result, TickRecord, Timeframe, TickrollError};

use crate::{ColumnarIndex, OhlcBucket};

/// Returns the start of the bucket containing `instant`.
///
/// Buckets are aligned to the epoch, so the result is always an exact
/// multiple of `bucket_seconds`, including for negative instants.
#[must_use]
pub const fn bucket_start(instant: i64, bucket_seconds: i64) -> i64 {
    instant.div_euclid(bucket_seconds) * bucket_seconds
}

/// Rolls one symbol's ticks up into fixed-width buckets.
///
/// Ticks must be fed in strictly ascending instant order; each completed
/// bucket is emitted as soon as a tick lands in a later one.
#[derive(Debug)]
pub struct OhlcAggregator {
    bucket_seconds: i64,
    current: Option<BucketBuilder>,
    last_instant: Option<i64>,
}

impl OhlcAggregator {
    /// Creates an aggregator for the given timeframe.
    #[must_use]
    pub const fn new(timeframe: Timeframe) -> Self {
        Self {
            bucket_seconds: timeframe.seconds(),
            current: None,
            last_instant: None,
        }
    }

    /// Creates an aggregator for a width in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::InvalidBucketDuration`] if `bucket_seconds`
    /// is not positive.
    pub fn with_seconds(bucket_seconds: i64) -> Result<Self> {
        if bucket_seconds <= 0 {
            return Err(TickrollError::InvalidBucketDuration(bucket_seconds));
        }
        Ok(Self {
            bucket_seconds,
            current: None,
            last_instant: None,
        })
    }

    /// Returns the bucket width in seconds.
    #[must_use]
    pub const fn bucket_seconds(&self) -> i64 {
        self.bucket_seconds
    }

    /// Folds a tick, returning the previous bucket if this tick closed it.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::UnorderedInstant`] if `instant` does not
    /// come strictly after the previously folded one. The aggregator is left
    /// unchanged in that case.
    pub fn process(&mut self, instant: i64, tick: &TickRecord) -> Result<Option<OhlcBucket>> {
        if let Some(previous) = self.last_instant.filter(|&last| last >= instant) {
            return Err(TickrollError::UnorderedInstant { previous, instant });
        }
        Ok(self.push(instant, tick))
    }

    /// Folds a tick already known to be in order.
    fn push(&mut self, instant: i64, tick: &TickRecord) -> Option<OhlcBucket> {
        self.last_instant = Some(instant);

        let start = bucket_start(instant, self.bucket_seconds);
        match self.current.take() {
            Some(mut builder) if builder.start == start => {
                builder.update(tick);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                self.current = Some(BucketBuilder::new(start, tick));
                Some(builder.finish())
            }
            None => {
                self.current = Some(BucketBuilder::new(start, tick));
                None
            }
        }
    }

    /// Finishes aggregation, returning the last open bucket.
    #[must_use]
    pub fn finish(self) -> Option<OhlcBucket> {
        self.current.map(BucketBuilder::finish)
    }

    /// Rolls up every tick of `symbol` in `index`.
    #[must_use]
    pub fn rollup(mut self, index: &ColumnarIndex, symbol: &str) -> Vec<OhlcBucket> {
        let mut buckets: Vec<OhlcBucket> = index
            .series(symbol)
            .filter_map(|(instant, tick)| self.push(instant, tick))
            .collect();
        buckets.extend(self.finish());
        buckets
    }
}

/// Rolls `symbol` up into buckets of `bucket_seconds` over `instants`.
///
/// Instants are walked in ascending order whatever order they are given in,
/// and a repeated instant is folded once. Instants where the symbol has no
/// tick are skipped, so sparse symbols produce no empty buckets.
///
/// # Errors
///
/// Returns [`TickrollError::InvalidBucketDuration`] if `bucket_seconds` is
/// not positive.
pub fn aggregate<I>(
    index: &ColumnarIndex,
    instants: I,
    symbol: &str,
    bucket_seconds: i64,
) -> Result<Vec<OhlcBucket>>
where
    I: IntoIterator<Item = i64>,
{
    let mut aggregator = OhlcAggregator::with_seconds(bucket_seconds)?;
    let mut buckets = Vec::new();

    let ordered: BTreeSet<i64> = instants.into_iter().collect();
    for instant in ordered {
        if let Some(tick) = index.get(instant, symbol) {
            buckets.extend(aggregator.push(instant, tick));
        }
    }
    buckets.extend(aggregator.finish());

    Ok(buckets)
}

/// Builder for one bucket.
#[derive(Debug)]
struct BucketBuilder {
    start: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    open_interest: i64,
    volume: i64,
}

impl BucketBuilder {
    /// Seeds a bucket with the open of its first tick, then folds that tick.
    fn new(start: i64, tick: &TickRecord) -> Self {
        let mut builder = Self {
            start,
            open: tick.open,
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
            close: tick.close,
            open_interest: tick.open_interest,
            volume: 0,
        };
        builder.update(tick);
        builder
    }

    fn update(&mut self, tick: &TickRecord) {
        self.high = self.high.max(tick.high);
        self.low = self.low.min(tick.low);
        self.close = tick.close;
        self.open_interest = tick.open_interest;
        self.volume += tick.volume;
    }

    const fn finish(self) -> OhlcBucket {
        OhlcBucket::new(
            self.start,
            self.open,
            self.high,
            self.low,
            self.close,
            self.open_interest,
            self.volume,
        )
    }
}
