//! Instrument identity derived from raw ticker symbols.

use serde::{Deserialize, Serialize};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (`CE` suffix).
    #[serde(rename = "CE")]
    Call,
    /// Put option (`PE` suffix).
    #[serde(rename = "PE")]
    Put,
}

impl OptionType {
    /// Returns the exchange suffix for this option type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }

    /// Parses an exchange suffix (`CE` or `PE`).
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "CE" => Some(Self::Call),
            "PE" => Some(Self::Put),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of instrument a symbol denotes.
///
/// Strike and option type only exist on [`InstrumentKind::Option`], so an
/// identity can never carry a strike without being an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// The underlying quoted directly.
    Spot,
    /// A future on the underlying.
    Future,
    /// An option on the underlying.
    Option {
        /// Strike price.
        strike: u32,
        /// Call or put.
        option_type: OptionType,
    },
}

impl InstrumentKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Future => "future",
            Self::Option { .. } => "option",
        }
    }
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parsed structural meaning of a raw ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerIdentity {
    /// Symbol exactly as it appeared in the input.
    raw_symbol: String,
    /// Base instrument (e.g. "NIFTY" for "NIFTY-FUT").
    underlying: String,
    /// Spot, future or option.
    kind: InstrumentKind,
}

impl TickerIdentity {
    /// Creates a new identity.
    #[must_use]
    pub fn new(
        raw_symbol: impl Into<String>,
        underlying: impl Into<String>,
        kind: InstrumentKind,
    ) -> Self {
        Self {
            raw_symbol: raw_symbol.into(),
            underlying: underlying.into(),
            kind,
        }
    }

    /// Returns the raw symbol.
    #[must_use]
    pub fn raw_symbol(&self) -> &str {
        &self.raw_symbol
    }

    /// Returns the underlying.
    #[must_use]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Returns the instrument kind.
    #[must_use]
    pub const fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Returns the strike for options.
    #[must_use]
    pub const fn strike(&self) -> Option<u32> {
        match self.kind {
            InstrumentKind::Option { strike, .. } => Some(strike),
            _ => None,
        }
    }

    /// Returns call/put for options.
    #[must_use]
    pub const fn option_type(&self) -> Option<OptionType> {
        match self.kind {
            InstrumentKind::Option { option_type, .. } => Some(option_type),
            _ => None,
        }
    }

    /// Returns true if this is a spot instrument.
    #[must_use]
    pub const fn is_spot(&self) -> bool {
        matches!(self.kind, InstrumentKind::Spot)
    }

    /// Returns true if this is a future.
    #[must_use]
    pub const fn is_future(&self) -> bool {
        matches!(self.kind, InstrumentKind::Future)
    }

    /// Returns true if this is an option.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        matches!(self.kind, InstrumentKind::Option { .. })
    }

    /// Returns true for futures and options.
    #[must_use]
    pub const fn is_derivative(&self) -> bool {
        !self.is_spot()
    }

    /// Returns the exchange instrument type: `CE`, `PE`, `FUT`, or empty for spot.
    #[must_use]
    pub const fn instrument_type(&self) -> &'static str {
        match self.kind {
            InstrumentKind::Spot => "",
            InstrumentKind::Future => "FUT",
            InstrumentKind::Option { option_type, .. } => option_type.as_str(),
        }
    }
}

impl std::fmt::Display for TickerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            InstrumentKind::Option {
                strike,
                option_type,
            } => write!(
                f,
                "{} ({} {} {})",
                self.raw_symbol, self.underlying, strike, option_type
            ),
            kind => write!(f, "{} ({} {})", self.raw_symbol, self.underlying, kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_identity() {
        let identity = TickerIdentity::new(
            "NIFTYWK15500PE",
            "NIFTY",
            InstrumentKind::Option {
                strike: 15500,
                option_type: OptionType::Put,
            },
        );

        assert!(identity.is_option());
        assert!(identity.is_derivative());
        assert!(!identity.is_spot());
        assert_eq!(identity.strike(), Some(15500));
        assert_eq!(identity.option_type(), Some(OptionType::Put));
        assert_eq!(identity.instrument_type(), "PE");
        assert_eq!(identity.to_string(), "NIFTYWK15500PE (NIFTY 15500 PE)");
    }

    #[test]
    fn test_future_has_no_strike() {
        let identity = TickerIdentity::new("NIFTY-FUT", "NIFTY", InstrumentKind::Future);

        assert!(identity.is_future());
        assert_eq!(identity.strike(), None);
        assert_eq!(identity.option_type(), None);
        assert_eq!(identity.instrument_type(), "FUT");
    }

    #[test]
    fn test_spot_instrument_type_is_empty() {
        let identity = TickerIdentity::new("INDIAVIX", "INDIAVIX", InstrumentKind::Spot);
        assert_eq!(identity.instrument_type(), "");
        assert_eq!(identity.to_string(), "INDIAVIX (INDIAVIX spot)");
    }

    #[test]
    fn test_option_type_suffix() {
        assert_eq!(OptionType::from_suffix("CE"), Some(OptionType::Call));
        assert_eq!(OptionType::from_suffix("PE"), Some(OptionType::Put));
        assert_eq!(OptionType::from_suffix("FUT"), None);
    }
}
