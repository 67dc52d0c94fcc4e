//! Tick record representation.

use serde::{Deserialize, Serialize};

use crate::row::{RawRow, columns};
use crate::{Result, TickrollError};

/// A single observation of an instrument at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Open interest (zero for spot instruments).
    pub open_interest: i64,
    /// Traded volume (zero for spot instruments).
    pub volume: i64,
}

impl TickRecord {
    /// Creates a new tick record.
    #[must_use]
    pub const fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        open_interest: i64,
        volume: i64,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            open_interest,
            volume,
        }
    }

    /// Parses a tick from its six string fields in positional order:
    /// open, high, low, close, open interest, volume.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::MalformedNumericField`] naming the first field
    /// that does not parse.
    pub fn from_fields(fields: [&str; 6]) -> Result<Self> {
        let [open, high, low, close, open_interest, volume] = fields;
        Ok(Self {
            open: parse_price(columns::OPEN, open)?,
            high: parse_price(columns::HIGH, high)?,
            low: parse_price(columns::LOW, low)?,
            close: parse_price(columns::CLOSE, close)?,
            open_interest: parse_count(columns::OPEN_INTEREST, open_interest)?,
            volume: parse_count(columns::VOLUME, volume)?,
        })
    }

    /// Reads the six numeric columns of a raw row.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::MissingField`] if a column is absent, or
    /// [`TickrollError::MalformedNumericField`] if a value does not parse.
    pub fn from_row<R: RawRow + ?Sized>(row: &R) -> Result<Self> {
        let mut fields = [""; 6];
        for (slot, column) in fields.iter_mut().zip(columns::NUMERIC) {
            *slot = row
                .field(column)
                .ok_or(TickrollError::MissingField(column))?;
        }
        Self::from_fields(fields)
    }

    /// Returns the value used for derived computations (the close).
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.close
    }
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TickrollError::MalformedNumericField {
            field,
            value: raw.to_string(),
        })
}

fn parse_count(field: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| TickrollError::MalformedNumericField {
            field,
            value: raw.to_string(),
        })
}
