//! Allow-list symbol selectors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tickroll_types::SymbolFilter;

use crate::classify;

/// Entry that matches any symbol or underlying.
const WILDCARD: &str = "*";

/// Selects symbols by spot name or derivative underlying.
///
/// Symbols are first checked against `exclude_prefixes`, then classified.
/// Spot symbols must appear in `spot`; futures and options must have their
/// underlying in `underlyings`. All comparisons ignore ASCII case and `*`
/// matches anything. Symbols that fail classification are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowList {
    /// Accepted raw spot symbols.
    pub spot: Vec<String>,
    /// Underlyings whose futures and options are accepted.
    pub underlyings: Vec<String>,
    /// Symbol prefixes rejected before any other check.
    pub exclude_prefixes: Vec<String>,
}

impl AllowList {
    /// Creates an empty allow-list that accepts nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spot: Vec::new(),
            underlyings: Vec::new(),
            exclude_prefixes: Vec::new(),
        }
    }

    /// Creates an allow-list that accepts every well-formed symbol.
    #[must_use]
    pub fn everything() -> Self {
        Self::new().with_spot(WILDCARD).with_underlying(WILDCARD)
    }

    /// Adds an accepted spot symbol.
    #[must_use]
    pub fn with_spot(mut self, symbol: impl Into<String>) -> Self {
        self.spot.push(symbol.into());
        self
    }

    /// Adds an accepted derivative underlying.
    #[must_use]
    pub fn with_underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlyings.push(underlying.into());
        self
    }

    /// Adds a rejected symbol prefix.
    #[must_use]
    pub fn with_excluded_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefixes.push(prefix.into());
        self
    }

    /// Returns true if `symbol` is selected.
    ///
    /// Classifies `symbol` on every call. `ColumnarIndex::build` asks once
    /// per distinct ticker in a batch.
    #[must_use]
    pub fn allows(&self, symbol: &str) -> bool {
        if self
            .exclude_prefixes
            .iter()
            .any(|prefix| has_prefix_ignore_case(symbol, prefix))
        {
            return false;
        }

        match classify(symbol) {
            Ok(identity) if identity.is_spot() => contains_ignore_case(&self.spot, symbol),
            Ok(identity) => contains_ignore_case(&self.underlyings, identity.underlying()),
            Err(err) => {
                tracing::debug!(symbol, error = %err, "rejecting unclassifiable symbol");
                false
            }
        }
    }
}

impl SymbolFilter for AllowList {
    fn accepts(&self, symbol: &str) -> bool {
        self.allows(symbol)
    }
}

impl From<Profile> for AllowList {
    fn from(profile: Profile) -> Self {
        profile.allow_list()
    }
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter()
        .any(|entry| entry == WILDCARD || entry.eq_ignore_ascii_case(value))
}

fn has_prefix_ignore_case(symbol: &str, prefix: &str) -> bool {
    symbol
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Named allow-list presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// NIFTY options and futures only.
    NiftyDerivatives,
    /// NIFTY derivatives plus the index, bank index and VIX spot series.
    #[default]
    NiftyExpiry,
    /// NIFTY derivatives plus the NIFTY and VIX spot series.
    NiftyWeekly,
    /// Every well-formed symbol except currency pairs.
    All,
}

impl Profile {
    /// Returns all profiles.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::NiftyDerivatives,
            Self::NiftyExpiry,
            Self::NiftyWeekly,
            Self::All,
        ]
    }

    /// Returns the profile name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NiftyDerivatives => "nifty-derivatives",
            Self::NiftyExpiry => "nifty-expiry",
            Self::NiftyWeekly => "nifty-weekly",
            Self::All => "all",
        }
    }

    /// Builds the allow-list for this profile.
    #[must_use]
    pub fn allow_list(&self) -> AllowList {
        match self {
            Self::NiftyDerivatives => AllowList::new().with_underlying("NIFTY"),
            Self::NiftyExpiry => ["INDIAVIX", "NIFTY", "NIFTY-FUT", "BANKNIFTY", "BANKNIFTY-FUT"]
                .into_iter()
                .fold(AllowList::new(), AllowList::with_spot)
                .with_underlying("NIFTY"),
            Self::NiftyWeekly => AllowList::new()
                .with_spot("NIFTY")
                .with_spot("NIFTY-FUT")
                .with_spot("INDIAVIX")
                .with_underlying("NIFTY"),
            Self::All => AllowList::everything().with_excluded_prefix("USDINR"),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .into_iter()
            .find(|profile| profile.as_str() == wanted)
            .ok_or_else(|| ProfileParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown profile name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileParseError(String);

impl std::fmt::Display for ProfileParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = Profile::all().iter().map(Profile::as_str).collect();
        write!(
            f,
            "unknown profile '{}', expected one of: {}",
            self.0,
            names.join(", ")
        )
    }
}

impl std::error::Error for ProfileParseError {}
