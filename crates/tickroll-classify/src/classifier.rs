//! Symbol shape recognition.
//!
//! Three shapes are tested in order:
//!
//! 1. Future: `^[A-Z]+-FUT$`
//! 2. Option: `^[A-Z]+[0-9]+(CE|PE)$`, after weekly normalization
//! 3. Spot: anything else

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use tickroll_types::{InstrumentKind, OptionType, Result, TickerIdentity, TickrollError};

macro_rules! re {
    ($pat:expr) => {
        LazyLock::new(|| Regex::new($pat).expect("symbol pattern compiles"))
    };
}

/// `NIFTY-FUT`: underlying.
static FUTURE: LazyLock<Regex> = re!(r"^([A-Z]+)-FUT$");

/// `NIFTY15500PE`: underlying, strike, option type.
static OPTION: LazyLock<Regex> = re!(r"^([A-Z]+)([0-9]+)(CE|PE)$");

/// `NIFTYWK15500PE`: underlying, then strike and option type together.
///
/// The underlying needs at least one letter, so `WK100CE` is a monthly
/// option on `WK`.
static WEEKLY_OPTION: LazyLock<Regex> = re!(r"^([A-Z]+)WK([0-9]+(?:CE|PE))$");

/// An option-shaped symbol split into its parts.
struct OptionParts<'a> {
    root: &'a str,
    strike: &'a str,
    option_type: OptionType,
}

fn future_root(raw: &str) -> Option<&str> {
    Some(FUTURE.captures(raw)?.get(1)?.as_str())
}

fn option_parts(raw: &str) -> Option<OptionParts<'_>> {
    let caps = OPTION.captures(raw)?;
    Some(OptionParts {
        root: caps.get(1)?.as_str(),
        strike: caps.get(2)?.as_str(),
        option_type: OptionType::from_suffix(caps.get(3)?.as_str())?,
    })
}

fn weekly_root(raw: &str) -> Option<&str> {
    Some(WEEKLY_OPTION.captures(raw)?.get(1)?.as_str())
}

/// Rewrites a weekly option symbol into its monthly form.
///
/// `NIFTYWK15500PE` becomes `NIFTY15500PE`. Anything that is not a weekly
/// option symbol is returned unchanged and unallocated.
#[must_use]
pub fn normalize_weekly(raw: &str) -> Cow<'_, str> {
    WEEKLY_OPTION
        .captures(raw)
        .map_or(Cow::Borrowed(raw), |caps| {
            Cow::Owned(format!("{}{}", &caps[1], &caps[2]))
        })
}

/// Returns the underlying of a raw symbol without building an identity.
///
/// Applies the same rules as [`classify`]; symbols it cannot read are their
/// own underlying.
#[must_use]
pub fn underlying_of(raw: &str) -> &str {
    future_root(raw)
        .or_else(|| weekly_root(raw))
        .or_else(|| option_parts(raw).map(|parts| parts.root))
        .unwrap_or(raw)
}

/// Parses a raw ticker symbol into a [`TickerIdentity`].
///
/// # Errors
///
/// Returns [`TickrollError::MalformedSymbol`] if the symbol is empty, contains
/// whitespace or control characters, or is option-shaped with a strike that
/// does not fit in 32 bits.
///
/// # Examples
///
/// ```
/// use tickroll_classify::classify;
///
/// let identity = classify("NIFTYWK15500PE").unwrap();
/// assert_eq!(identity.underlying(), "NIFTY");
/// assert_eq!(identity.strike(), Some(15500));
/// assert_eq!(identity.instrument_type(), "PE");
/// ```
pub fn classify(raw: &str) -> Result<TickerIdentity> {
    if raw.is_empty() {
        return Err(TickrollError::malformed_symbol(raw, "empty symbol"));
    }
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TickrollError::malformed_symbol(
            raw,
            "contains whitespace or control characters",
        ));
    }

    if let Some(root) = future_root(raw) {
        return Ok(TickerIdentity::new(raw, root, InstrumentKind::Future));
    }

    let normalized = normalize_weekly(raw);
    if let Some(parts) = option_parts(&normalized) {
        let strike = parts
            .strike
            .parse::<u32>()
            .map_err(|_| TickrollError::malformed_symbol(raw, "strike out of range"))?;
        let kind = InstrumentKind::Option {
            strike,
            option_type: parts.option_type,
        };
        return Ok(TickerIdentity::new(raw, parts.root, kind));
    }

    Ok(TickerIdentity::new(raw, raw, InstrumentKind::Spot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future() {
        let identity = classify("NIFTY-FUT").unwrap();
        assert!(identity.is_future());
        assert_eq!(identity.underlying(), "NIFTY");
        assert_eq!(identity.raw_symbol(), "NIFTY-FUT");
        assert_eq!(identity.strike(), None);
        assert_eq!(identity.instrument_type(), "FUT");
    }

    #[test]
    fn test_monthly_option() {
        let identity = classify("BANKNIFTY36000CE").unwrap();
        assert!(identity.is_option());
        assert_eq!(identity.underlying(), "BANKNIFTY");
        assert_eq!(identity.strike(), Some(36000));
        assert_eq!(identity.option_type(), Some(OptionType::Call));
    }

    #[test]
    fn test_weekly_and_monthly_share_underlying() {
        let weekly = classify("NIFTYWK15500PE").unwrap();
        let monthly = classify("NIFTY15500PE").unwrap();

        assert_eq!(weekly.underlying(), "NIFTY");
        assert_eq!(monthly.underlying(), "NIFTY");
        assert_eq!(weekly.strike(), monthly.strike());
        assert_eq!(weekly.raw_symbol(), "NIFTYWK15500PE");
    }

    #[test]
    fn test_spot_fallback() {
        for raw in ["INDIAVIX", "NIFTY", "nifty-fut", "NIFTY15500XE", "NIFTY-FUT-1"] {
            let identity = classify(raw).unwrap();
            assert!(identity.is_spot(), "{raw} should be spot");
            assert_eq!(identity.underlying(), raw);
            assert_eq!(identity.instrument_type(), "");
        }
    }

    #[test]
    fn test_bare_marker_is_not_stripped() {
        let identity = classify("WK100CE").unwrap();
        assert_eq!(identity.underlying(), "WK");
        assert_eq!(identity.strike(), Some(100));
    }

    #[test]
    fn test_patterns_are_anchored() {
        let shapes = [
            "XNIFTY-FUTX",
            "NIFTY-FUTURES",
            "NIFTY15500CEX",
            "1NIFTY15500CE",
            "NIFTY-15500CE",
        ];
        for raw in shapes {
            assert!(classify(raw).unwrap().is_spot(), "{raw} should be spot");
            assert_eq!(underlying_of(raw), raw);
        }
        assert!(classify("ÄNIFTY15500CE").unwrap().is_spot());
    }

    #[test]
    fn test_repeated_weekly_marker() {
        let identity = classify("NIFTYWKWK15500CE").unwrap();
        assert_eq!(identity.underlying(), "NIFTYWK");
        assert_eq!(underlying_of("NIFTYWKWK15500CE"), "NIFTYWK");
        assert_eq!(normalize_weekly("WKWK100PE"), "WK100PE");
    }

    #[test]
    fn test_malformed_symbols() {
        for raw in ["", "NIFTY FUT", "NIFTY\t", "NIFTY99999999999CE"] {
            assert!(
                matches!(classify(raw), Err(TickrollError::MalformedSymbol { .. })),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_underlying_of_matches_classify() {
        for raw in ["NIFTY-FUT", "NIFTYWK15500PE", "FINNIFTY19000CE", "INDIAVIX"] {
            assert_eq!(underlying_of(raw), classify(raw).unwrap().underlying());
        }
        assert_eq!(underlying_of(""), "");
    }

    #[test]
    fn test_normalize_weekly() {
        assert_eq!(normalize_weekly("NIFTYWK15500PE"), "NIFTY15500PE");
        assert_eq!(normalize_weekly("BANKNIFTYWK36000CE"), "BANKNIFTY36000CE");
        assert!(matches!(normalize_weekly("NIFTY15500PE"), Cow::Borrowed(_)));
        assert!(matches!(normalize_weekly("NIFTYWK"), Cow::Borrowed(_)));
    }
}
