//! Expiry classification.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether a batch of contracts expires weekly or monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpiryKind {
    /// Weekly contract expiry.
    Weekly,
    /// Monthly contract expiry.
    Monthly,
}

impl ExpiryKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }

    /// Returns true for weekly expiries.
    #[must_use]
    pub const fn is_weekly(&self) -> bool {
        matches!(self, Self::Weekly)
    }

    /// Returns true for monthly expiries.
    #[must_use]
    pub const fn is_monthly(&self) -> bool {
        matches!(self, Self::Monthly)
    }

    /// Reads the kind from an input folder name such as `weekly` or `Monthly`.
    #[must_use]
    pub fn from_dir_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

impl std::fmt::Display for ExpiryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpiryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            _ => Err(format!("Unknown expiry kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_kind_serde() {
        assert_eq!(
            serde_json::to_string(&ExpiryKind::Weekly).unwrap(),
            "\"WEEKLY\""
        );
        let kind: ExpiryKind = serde_json::from_str("\"MONTHLY\"").unwrap();
        assert_eq!(kind, ExpiryKind::Monthly);
    }

    #[test]
    fn test_from_dir_name() {
        assert_eq!(ExpiryKind::from_dir_name("weekly"), Some(ExpiryKind::Weekly));
        assert_eq!(ExpiryKind::from_dir_name("Monthly"), Some(ExpiryKind::Monthly));
        assert_eq!(ExpiryKind::from_dir_name("2021"), None);
    }
}
