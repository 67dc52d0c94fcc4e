//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tickroll_aggregate::{
    BuildOptions, DuplicatePolicy, ExpiryPolicy, FixedExpiry, RowErrorPolicy, TradingDayCount,
};
use tickroll_classify::{AllowList, Profile};
use tickroll_types::{ExpiryKind, LocalZone, Result, Timeframe, TickrollError};

/// Settings for processing tick batches.
///
/// Every field has a default, so a JSON file only needs the fields it changes:
///
/// ```json
/// { "zone": "UTC", "timeframes": ["1m", "15m"], "row_errors": "skip-and-log" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Zone the `Date/Time` column is written in.
    pub zone: LocalZone,
    /// Rollups computed for every selected symbol.
    pub timeframes: Vec<Timeframe>,
    /// Which symbols to keep.
    pub allow_list: AllowList,
    /// Handling of repeated `(instant, symbol)` rows.
    pub duplicates: DuplicatePolicy,
    /// Handling of unparsable rows.
    pub row_errors: RowErrorPolicy,
    /// Most trading days a weekly batch can span.
    pub max_weekly_trading_days: usize,
    /// Take the expiry kind from a `weekly/` or `monthly/` input folder.
    pub trust_directory_hint: bool,
    /// Underlyings left out of the expiry index.
    pub ignore_underlyings: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            zone: LocalZone::default(),
            timeframes: Timeframe::DEFAULT_ROLLUPS.to_vec(),
            allow_list: Profile::default().allow_list(),
            duplicates: DuplicatePolicy::default(),
            row_errors: RowErrorPolicy::default(),
            max_weekly_trading_days: TradingDayCount::default().max_weekly_days,
            trust_directory_hint: false,
            ignore_underlyings: vec!["INDIAVIX".to_string()],
        }
    }
}

impl PipelineConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Self::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks the settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`TickrollError::Config`] if no timeframe is configured or the
    /// weekly threshold is zero.
    pub fn validate(&self) -> Result<()> {
        if self.timeframes.is_empty() {
            return Err(TickrollError::Config(
                "at least one timeframe is required".to_string(),
            ));
        }
        if self.max_weekly_trading_days == 0 {
            return Err(TickrollError::Config(
                "max_weekly_trading_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the allow-list from a profile.
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.allow_list = profile.allow_list();
        self
    }

    /// Sets the rollup timeframes.
    #[must_use]
    pub fn with_timeframes(mut self, timeframes: Vec<Timeframe>) -> Self {
        self.timeframes = timeframes;
        self
    }

    /// Sets the timestamp zone.
    #[must_use]
    pub fn with_zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    /// Index build options derived from the row policies.
    #[must_use]
    pub const fn build_options(&self) -> BuildOptions {
        BuildOptions {
            duplicates: self.duplicates,
            row_errors: self.row_errors,
        }
    }

    /// Returns the expiry policy for a batch with the given folder hint.
    #[must_use]
    pub fn expiry_policy(&self, hint: Option<ExpiryKind>) -> Box<dyn ExpiryPolicy> {
        match hint {
            Some(kind) if self.trust_directory_hint => Box::new(FixedExpiry(kind)),
            _ => Box::new(TradingDayCount::new(self.max_weekly_trading_days)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.zone, LocalZone::IST);
        assert_eq!(config.timeframes, Timeframe::DEFAULT_ROLLUPS.to_vec());
        assert_eq!(config.max_weekly_trading_days, 5);
        assert_eq!(config.ignore_underlyings, vec!["INDIAVIX"]);
        assert!(config.allow_list.allows("NIFTY14500CE"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = PipelineConfig::from_json_str(
            r#"{ "zone": "UTC", "timeframes": ["15m"], "row_errors": "skip-and-log" }"#,
        )
        .unwrap();

        assert_eq!(config.zone, LocalZone::UTC);
        assert_eq!(config.timeframes, vec![Timeframe::MINUTE_15]);
        assert_eq!(config.row_errors, RowErrorPolicy::SkipAndLog);
        assert_eq!(config.duplicates, DuplicatePolicy::LastWriteWins);
    }

    #[test]
    fn test_empty_timeframes_rejected() {
        let result = PipelineConfig::from_json_str(r#"{ "timeframes": [] }"#);
        assert!(matches!(result, Err(TickrollError::Config(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = PipelineConfig::from_json_str("{ zone: ");
        assert!(matches!(result, Err(TickrollError::Json(_))));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickroll.json");
        std::fs::write(&path, r#"{ "max_weekly_trading_days": 4 }"#).unwrap();

        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.max_weekly_trading_days, 4);

        let missing = PipelineConfig::from_json_file(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(TickrollError::Io(_))));
    }

    #[test]
    fn test_expiry_policy_hint() {
        let seven_days: BTreeSet<_> = (1..=7)
            .map(|d| chrono::NaiveDate::from_ymd_opt(2021, 3, d).unwrap())
            .collect();

        let config = PipelineConfig::default();
        let policy = config.expiry_policy(Some(ExpiryKind::Weekly));
        assert_eq!(policy.classify(&seven_days), ExpiryKind::Monthly);

        let config = PipelineConfig {
            trust_directory_hint: true,
            ..PipelineConfig::default()
        };
        let policy = config.expiry_policy(Some(ExpiryKind::Weekly));
        assert_eq!(policy.classify(&seven_days), ExpiryKind::Weekly);
    }
}
