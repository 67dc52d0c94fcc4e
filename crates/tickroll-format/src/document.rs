//! Serializable output documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tickroll_aggregate::OhlcBucket;
use tickroll_types::{ExpiryKind, TickerIdentity, Timeframe};

/// `[bucket_start, open, high, low, close, open_interest, volume]`.
pub type DataRow = (i64, f64, f64, f64, f64, i64, i64);

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One symbol rolled up at one timeframe for one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDocument {
    /// Raw ticker symbol.
    pub ticker: String,
    /// Expiry date as `YYYY-MM-DD`.
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
    /// Bucket width in whole minutes.
    pub tf_minutes: u32,
    /// Bucket width in seconds.
    pub tf_seconds: i64,
    /// True for options.
    pub is_option: bool,
    /// True for futures.
    pub is_future: bool,
    /// True for spot instruments.
    pub is_spot: bool,
    /// `CE`, `PE`, `FUT`, or empty for spot.
    pub instrument_type: String,
    /// Strike price, for options only.
    pub strike: Option<u32>,
    /// Underlying instrument.
    pub underlying: String,
    /// Buckets in ascending start order.
    pub data: Vec<DataRow>,
}

impl SeriesDocument {
    /// Builds the document for `identity`'s buckets.
    #[must_use]
    pub fn new(
        identity: &TickerIdentity,
        expiry: NaiveDate,
        timeframe: Timeframe,
        buckets: &[OhlcBucket],
    ) -> Self {
        Self {
            ticker: identity.raw_symbol().to_string(),
            expiry_date: expiry.format(DATE_FORMAT).to_string(),
            tf_minutes: timeframe.whole_minutes(),
            tf_seconds: timeframe.seconds(),
            is_option: identity.is_option(),
            is_future: identity.is_future(),
            is_spot: identity.is_spot(),
            instrument_type: identity.instrument_type().to_string(),
            strike: identity.strike(),
            underlying: identity.underlying().to_string(),
            data: buckets.iter().map(OhlcBucket::as_tuple).collect(),
        }
    }

    /// Returns the data rows as buckets.
    #[must_use]
    pub fn buckets(&self) -> Vec<OhlcBucket> {
        self.data
            .iter()
            .map(|&(start, open, high, low, close, oi, volume)| {
                OhlcBucket::new(start, open, high, low, close, oi, volume)
            })
            .collect()
    }
}

/// Symbols that share one expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolsDocument {
    /// Expiry date as `YYYY-MM-DD`.
    pub expiry_date: String,
    /// True for monthly expiries.
    pub is_monthly_expiry: bool,
    /// True for weekly expiries.
    pub is_weekly_expiry: bool,
    /// Raw ticker symbols, sorted.
    pub symbols: Vec<String>,
}

impl SymbolsDocument {
    /// Builds the document, sorting the symbols.
    #[must_use]
    pub fn new(expiry: NaiveDate, kind: ExpiryKind, mut symbols: Vec<String>) -> Self {
        symbols.sort_unstable();
        symbols.dedup();
        Self {
            expiry_date: expiry.format(DATE_FORMAT).to_string(),
            is_monthly_expiry: kind.is_monthly(),
            is_weekly_expiry: kind.is_weekly(),
            symbols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickroll_types::{InstrumentKind, OptionType};

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 4).unwrap()
    }

    #[test]
    fn test_series_document_fields() {
        let identity = TickerIdentity::new(
            "NIFTYWK15000CE",
            "NIFTY",
            InstrumentKind::Option {
                strike: 15000,
                option_type: OptionType::Call,
            },
        );
        let buckets = [OhlcBucket::new(1_614_830_400, 120.0, 125.0, 118.0, 121.0, 900, 50)];
        let doc = SeriesDocument::new(&identity, expiry(), Timeframe::MINUTE_5, &buckets);

        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["ticker"], "NIFTYWK15000CE");
        assert_eq!(json["expiryDate"], "2021-03-04");
        assert_eq!(json["tf_minutes"], 5);
        assert_eq!(json["tf_seconds"], 300);
        assert_eq!(json["is_option"], true);
        assert_eq!(json["instrument_type"], "CE");
        assert_eq!(json["strike"], 15000);
        assert_eq!(json["underlying"], "NIFTY");
        assert_eq!(json["data"][0][0], 1_614_830_400_i64);
        assert_eq!(json["data"][0][6], 50);

        assert_eq!(doc.buckets(), buckets);
    }

    #[test]
    fn test_spot_has_null_strike() {
        let identity = TickerIdentity::new("INDIAVIX", "INDIAVIX", InstrumentKind::Spot);
        let doc = SeriesDocument::new(&identity, expiry(), Timeframe::from_seconds(90).unwrap(), &[]);

        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert!(json["strike"].is_null());
        assert_eq!(json["tf_minutes"], 1);
        assert_eq!(json["tf_seconds"], 90);
        assert_eq!(json["instrument_type"], "");
    }

    #[test]
    fn test_symbols_document() {
        let doc = SymbolsDocument::new(
            expiry(),
            ExpiryKind::Weekly,
            vec!["NIFTY-FUT".into(), "INDIAVIX".into(), "NIFTY-FUT".into()],
        );

        assert_eq!(doc.symbols, vec!["INDIAVIX", "NIFTY-FUT"]);
        assert!(doc.is_weekly_expiry);
        assert!(!doc.is_monthly_expiry);
        assert_eq!(doc.expiry_date, "2021-03-04");
    }
}
