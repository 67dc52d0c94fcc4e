//! Expiry detection and per-underlying expiry bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tickroll_types::{ExpiryKind, LocalZone};

/// Decides whether a batch is a weekly or monthly expiry from the calendar
/// days it spans.
pub trait ExpiryPolicy {
    /// Classifies a batch given its distinct local trading days.
    fn classify(&self, trading_days: &BTreeSet<NaiveDate>) -> ExpiryKind;
}

/// Monthly if the batch spans more than `max_weekly_days` trading days.
///
/// A weekly series trades for at most a week, so anything longer is assumed
/// to be a monthly series. A monthly file shorter than that is misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingDayCount {
    /// Most trading days a weekly batch can span.
    pub max_weekly_days: usize,
}

impl TradingDayCount {
    /// Creates the policy with a custom threshold.
    #[must_use]
    pub const fn new(max_weekly_days: usize) -> Self {
        Self { max_weekly_days }
    }
}

impl Default for TradingDayCount {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ExpiryPolicy for TradingDayCount {
    fn classify(&self, trading_days: &BTreeSet<NaiveDate>) -> ExpiryKind {
        if trading_days.len() > self.max_weekly_days {
            ExpiryKind::Monthly
        } else {
            ExpiryKind::Weekly
        }
    }
}

/// Always returns the same kind, for batches whose folder already says it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedExpiry(pub ExpiryKind);

impl ExpiryPolicy for FixedExpiry {
    fn classify(&self, _trading_days: &BTreeSet<NaiveDate>) -> ExpiryKind {
        self.0
    }
}

/// Expiry facts of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchExpiry {
    /// Local calendar day of the batch's last instant.
    pub date: NaiveDate,
    /// Weekly or monthly.
    pub kind: ExpiryKind,
    /// Number of distinct local calendar days in the batch.
    pub trading_days: usize,
}

impl BatchExpiry {
    /// Detects the expiry of a batch from its instants.
    ///
    /// Each file holds a series up to its expiry, so the last instant falls
    /// on the expiry day. Returns `None` for an empty batch.
    pub fn detect<I>(instants: I, zone: &LocalZone, policy: &dyn ExpiryPolicy) -> Option<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut last: Option<i64> = None;
        let mut days = BTreeSet::new();
        for instant in instants {
            last = Some(last.map_or(instant, |l| l.max(instant)));
            if let Some(day) = zone.calendar_day(instant) {
                days.insert(day);
            }
        }

        let date = zone.calendar_day(last?)?;
        let kind = policy.classify(&days);
        tracing::debug!(%date, %kind, trading_days = days.len(), "detected batch expiry");

        Some(Self {
            date,
            kind,
            trading_days: days.len(),
        })
    }

    /// Returns the date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Expiry dates seen per underlying, across batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiryIndex {
    entries: BTreeMap<String, BTreeMap<NaiveDate, ExpiryKind>>,
}

impl ExpiryIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `underlying` has an expiry of `kind` on `date`.
    pub fn record(&mut self, underlying: &str, date: NaiveDate, kind: ExpiryKind) {
        self.entries
            .entry(underlying.to_string())
            .or_default()
            .insert(date, kind);
    }

    /// Drops the named underlyings, ignoring ASCII case.
    pub fn remove_underlyings<S: AsRef<str>>(&mut self, ignore: &[S]) {
        self.entries.retain(|underlying, _| {
            !ignore
                .iter()
                .any(|name| name.as_ref().eq_ignore_ascii_case(underlying))
        });
    }

    /// Returns the recorded underlyings in sorted order.
    pub fn underlyings(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the expiries recorded for `underlying`, oldest first.
    pub fn expiries(&self, underlying: &str) -> impl Iterator<Item = (NaiveDate, ExpiryKind)> + '_ {
        self.entries
            .get(underlying)
            .into_iter()
            .flat_map(|dates| dates.iter().map(|(&date, &kind)| (date, kind)))
    }

    /// Returns `underlying -> { YYYY-MM-DD -> kind }`.
    #[must_use]
    pub fn to_document(&self) -> BTreeMap<String, BTreeMap<String, ExpiryKind>> {
        self.entries
            .iter()
            .map(|(underlying, dates)| {
                let dates = dates
                    .iter()
                    .map(|(date, &kind)| (date.format("%Y-%m-%d").to_string(), kind))
                    .collect();
                (underlying.clone(), dates)
            })
            .collect()
    }

    /// Returns the number of underlyings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    /// Two instants per day, starting 2021-03-01 10:00 IST.
    fn instants_over(days: i64) -> Vec<i64> {
        let start = LocalZone::IST
            .parse_instant("01/03/2021 10:00:00")
            .unwrap();
        (0..days)
            .flat_map(|d| [start + d * DAY, start + d * DAY + 3600])
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_days_is_weekly() {
        let expiry = BatchExpiry::detect(
            instants_over(3),
            &LocalZone::IST,
            &TradingDayCount::default(),
        )
        .unwrap();

        assert_eq!(expiry.kind, ExpiryKind::Weekly);
        assert_eq!(expiry.trading_days, 3);
        assert_eq!(expiry.date, date(2021, 3, 3));
        assert_eq!(expiry.date_string(), "2021-03-03");
    }

    #[test]
    fn test_seven_days_is_monthly() {
        let expiry = BatchExpiry::detect(
            instants_over(7),
            &LocalZone::IST,
            &TradingDayCount::default(),
        )
        .unwrap();

        assert_eq!(expiry.kind, ExpiryKind::Monthly);
        assert_eq!(expiry.trading_days, 7);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let policy = TradingDayCount::default();
        let five = BatchExpiry::detect(instants_over(5), &LocalZone::IST, &policy).unwrap();
        let six = BatchExpiry::detect(instants_over(6), &LocalZone::IST, &policy).unwrap();

        assert_eq!(five.kind, ExpiryKind::Weekly);
        assert_eq!(six.kind, ExpiryKind::Monthly);
    }

    #[test]
    fn test_fixed_policy_overrides_count() {
        let expiry = BatchExpiry::detect(
            instants_over(2),
            &LocalZone::IST,
            &FixedExpiry(ExpiryKind::Monthly),
        )
        .unwrap();
        assert_eq!(expiry.kind, ExpiryKind::Monthly);
    }

    #[test]
    fn test_empty_batch() {
        let policy = TradingDayCount::default();
        assert!(BatchExpiry::detect(Vec::new(), &LocalZone::IST, &policy).is_none());
    }

    #[test]
    fn test_expiry_date_uses_zone() {
        // 2021-03-01 20:00 UTC is already 2021-03-02 in IST
        let instant = LocalZone::UTC
            .parse_instant("01/03/2021 20:00:00")
            .unwrap();
        let policy = TradingDayCount::default();

        let utc = BatchExpiry::detect([instant], &LocalZone::UTC, &policy).unwrap();
        let ist = BatchExpiry::detect([instant], &LocalZone::IST, &policy).unwrap();
        assert_eq!(utc.date, date(2021, 3, 1));
        assert_eq!(ist.date, date(2021, 3, 2));
    }

    #[test]
    fn test_expiry_index_document() {
        let mut index = ExpiryIndex::new();
        index.record("NIFTY", date(2021, 3, 25), ExpiryKind::Monthly);
        index.record("NIFTY", date(2021, 3, 4), ExpiryKind::Weekly);
        index.record("INDIAVIX", date(2021, 3, 4), ExpiryKind::Weekly);
        index.remove_underlyings(&["indiavix"]);

        let doc = index.to_document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["NIFTY"]["2021-03-04"], ExpiryKind::Weekly);
        assert_eq!(doc["NIFTY"]["2021-03-25"], ExpiryKind::Monthly);

        let dates: Vec<_> = index.expiries("NIFTY").map(|(d, _)| d).collect();
        assert_eq!(dates, vec![date(2021, 3, 4), date(2021, 3, 25)]);
        assert_eq!(index.expiries("BANKNIFTY").count(), 0);
    }
}
