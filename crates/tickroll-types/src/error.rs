//! Error types for tickroll.

use thiserror::Error;

/// Result type alias for tickroll operations.
pub type Result<T> = std::result::Result<T, TickrollError>;

/// Errors that can occur while classifying symbols and rolling up ticks.
#[derive(Error, Debug)]
pub enum TickrollError {
    /// The raw symbol matches none of the recognized shapes.
    #[error("Malformed symbol '{symbol}': {reason}")]
    MalformedSymbol {
        /// The offending symbol.
        symbol: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A `Date/Time` value could not be parsed in the configured zone.
    #[error("Malformed timestamp '{value}': {reason}")]
    MalformedTimestamp {
        /// The raw value.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// One of the six numeric tick fields failed to parse.
    #[error("Malformed {field} value '{value}'")]
    MalformedNumericField {
        /// Column name of the field.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A required column is absent from an input row.
    #[error("Missing column '{0}'")]
    MissingField(&'static str),

    /// A bucket duration that is zero or negative.
    #[error("Invalid bucket duration: {0}s (must be positive)")]
    InvalidBucketDuration(i64),

    /// Two rows for the same instant and symbol under a rejecting policy.
    #[error("Duplicate tick for {symbol} at {instant}")]
    DuplicateTick {
        /// The symbol that was repeated.
        symbol: String,
        /// Epoch seconds of the repeated instant.
        instant: i64,
    },

    /// A streamed instant that does not follow the previous one.
    #[error("Instant {instant} does not follow {previous}")]
    UnorderedInstant {
        /// The last instant accepted.
        previous: i64,
        /// The instant that arrived out of order.
        instant: i64,
    },

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TickrollError {
    /// Creates a malformed-symbol error.
    pub fn malformed_symbol(symbol: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedSymbol {
            symbol: symbol.into(),
            reason,
        }
    }

    /// Returns true if this error stems from bad input data rather than
    /// a caller or environment problem.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedSymbol { .. }
                | Self::MalformedTimestamp { .. }
                | Self::MalformedNumericField { .. }
                | Self::MissingField(_)
                | Self::DuplicateTick { .. }
        )
    }
}
