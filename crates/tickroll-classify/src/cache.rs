//! Memoized classification.

use std::collections::HashMap;

use tickroll_types::{Result, TickerIdentity};

use crate::classify;

/// Caches identities by raw symbol.
///
/// A batch sees the same few hundred symbols on every row, so each one is
/// classified once. Failures are not cached.
#[derive(Debug, Default, Clone)]
pub struct ClassifierCache {
    identities: HashMap<String, TickerIdentity>,
}

impl ClassifierCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identity for `raw`, classifying it on first use.
    ///
    /// # Errors
    ///
    /// Returns the classification error for malformed symbols.
    pub fn get_or_classify(&mut self, raw: &str) -> Result<&TickerIdentity> {
        if !self.identities.contains_key(raw) {
            let identity = classify(raw)?;
            self.identities.insert(raw.to_string(), identity);
        }
        Ok(&self.identities[raw])
    }

    /// Returns the number of cached identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns true if nothing has been classified yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
