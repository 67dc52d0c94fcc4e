//! Benchmark utilities for tickroll.
//!
//! Generates synthetic tick batches shaped like the NSE exports: one row per
//! symbol per minute across a handful of trading days.

use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::fmt::Write as _;
use tickroll_lib::columns;

/// Shape of a synthetic batch.
#[derive(Debug, Clone)]
pub struct SyntheticBatch {
    /// First trading day.
    pub start: NaiveDate,
    /// Number of consecutive trading days.
    pub days: u32,
    /// Minutes of trading per day, starting at 09:15.
    pub minutes_per_day: u32,
    /// Option strikes generated on each side (CE and PE).
    pub strikes: u32,
}

impl Default for SyntheticBatch {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap_or_default(),
            days: 5,
            minutes_per_day: 375,
            strikes: 10,
        }
    }
}

impl SyntheticBatch {
    /// Returns the symbols the batch covers.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols = vec![
            "NIFTY".to_string(),
            "INDIAVIX".to_string(),
            "NIFTY-FUT".to_string(),
            "BANKNIFTY34000CE".to_string(),
        ];
        for i in 0..self.strikes {
            let strike = 14_000 + i * 50;
            symbols.push(format!("NIFTY{strike}CE"));
            symbols.push(format!("NIFTYWK{strike}PE"));
        }
        symbols
    }

    /// Returns the total number of rows.
    pub fn row_count(&self) -> usize {
        (self.days * self.minutes_per_day) as usize * self.symbols().len()
    }

    /// Generates header-keyed rows in time order.
    pub fn rows(&self) -> Vec<HashMap<String, String>> {
        let symbols = self.symbols();
        let open = NaiveTime::from_hms_opt(9, 15, 0).unwrap_or_default();
        let mut rows = Vec::with_capacity(self.row_count());

        for day in 0..self.days {
            let date = self.start + Duration::days(i64::from(day));
            for minute in 0..self.minutes_per_day {
                let at = date.and_time(open) + Duration::minutes(i64::from(minute));
                let stamp = at.format("%d/%m/%Y %H:%M:%S").to_string();
                for (i, symbol) in symbols.iter().enumerate() {
                    let base = 100.0 + i as f64 + f64::from(minute % 17) * 0.25;
                    rows.push(HashMap::from([
                        (columns::TICKER.to_string(), symbol.clone()),
                        (columns::DATE_TIME.to_string(), stamp.clone()),
                        (columns::OPEN.to_string(), base.to_string()),
                        (columns::HIGH.to_string(), (base + 1.5).to_string()),
                        (columns::LOW.to_string(), (base - 1.0).to_string()),
                        (columns::CLOSE.to_string(), (base + 0.5).to_string()),
                        (columns::OPEN_INTEREST.to_string(), (1000 + minute).to_string()),
                        (columns::VOLUME.to_string(), (minute % 50 + 1).to_string()),
                    ]));
                }
            }
        }
        rows
    }

    /// Renders the batch as CSV text.
    pub fn to_csv(&self) -> String {
        let mut out = columns::REQUIRED.join(",");
        out.push('\n');
        for row in self.rows() {
            let fields: Vec<&str> = columns::REQUIRED
                .iter()
                .map(|column| row.get(*column).map_or("", String::as_str))
                .collect();
            let _ = writeln!(out, "{}", fields.join(","));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_count() {
        let batch = SyntheticBatch {
            days: 2,
            minutes_per_day: 3,
            strikes: 1,
            ..SyntheticBatch::default()
        };
        assert_eq!(batch.symbols().len(), 6);
        assert_eq!(batch.rows().len(), batch.row_count());
        assert_eq!(batch.row_count(), 36);
    }

    #[test]
    fn test_csv_header() {
        let batch = SyntheticBatch {
            days: 1,
            minutes_per_day: 1,
            strikes: 0,
            ..SyntheticBatch::default()
        };
        let csv = batch.to_csv();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Ticker,Date/Time,Open,High,Low,Close,Open Interest,Volume")
        );
        assert_eq!(lines.next(), Some("NIFTY,01/03/2021 09:15:00,100,101.5,99,100.5,1000,1"));
    }
}
