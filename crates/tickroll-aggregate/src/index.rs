//! Columnar view of a tick batch.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tickroll_types::{
    LocalZone, RawRow, Result, SymbolFilter, TickRecord, TickrollError, columns,
};

/// What to do when two rows share an instant and symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later row replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Fail with [`TickrollError::DuplicateTick`].
    Reject,
}

/// What to do when a selected row cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowErrorPolicy {
    /// Stop at the first bad row.
    #[default]
    FailFast,
    /// Drop the row with a warning and keep going.
    SkipAndLog,
}

/// Options for [`ColumnarIndex::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Duplicate `(instant, symbol)` handling.
    pub duplicates: DuplicatePolicy,
    /// Unparsable row handling.
    pub row_errors: RowErrorPolicy,
}

impl BuildOptions {
    /// Sets the duplicate policy.
    #[must_use]
    pub const fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Sets the row error policy.
    #[must_use]
    pub const fn with_row_errors(mut self, row_errors: RowErrorPolicy) -> Self {
        self.row_errors = row_errors;
        self
    }
}

/// Row counts gathered while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Rows read.
    pub rows: usize,
    /// Rows inserted into the index.
    pub selected: usize,
    /// Rows dropped because they failed to parse.
    pub skipped: usize,
    /// Rows that replaced an earlier row for the same instant and symbol.
    pub duplicates: usize,
}

impl BuildStats {
    /// Returns the number of rows the selector rejected.
    #[must_use]
    pub const fn filtered(&self) -> usize {
        self.rows - self.selected - self.skipped
    }
}

/// Result of [`ColumnarIndex::build`].
#[derive(Debug, Clone, Default)]
pub struct IndexBuild {
    /// The built index.
    pub index: ColumnarIndex,
    /// Selected symbols, sorted and without repeats.
    pub symbols: Vec<String>,
    /// Row counts.
    pub stats: BuildStats,
}

/// Ticks of a batch arranged as `instant -> symbol -> tick`.
///
/// Instants are epoch seconds and iterate in ascending order.
#[derive(Debug, Clone, Default)]
pub struct ColumnarIndex {
    columns: BTreeMap<i64, HashMap<String, TickRecord>>,
}

impl ColumnarIndex {
    /// Builds an index from raw rows.
    ///
    /// Rows whose ticker the selector rejects are skipped before their
    /// timestamp or numbers are looked at. The selector is asked once per
    /// distinct ticker.
    ///
    /// # Errors
    ///
    /// Under [`RowErrorPolicy::FailFast`], returns the first missing column,
    /// malformed timestamp or malformed number of a selected row. Under
    /// [`DuplicatePolicy::Reject`], returns [`TickrollError::DuplicateTick`].
    pub fn build<I, S>(
        rows: I,
        zone: &LocalZone,
        selector: &S,
        options: BuildOptions,
    ) -> Result<IndexBuild>
    where
        I: IntoIterator,
        I::Item: RawRow,
        S: SymbolFilter + ?Sized,
    {
        let mut columns: BTreeMap<i64, HashMap<String, TickRecord>> = BTreeMap::new();
        let mut symbols = BTreeSet::new();
        let mut decisions: HashMap<String, bool> = HashMap::new();
        let mut stats = BuildStats::default();

        for row in rows {
            stats.rows += 1;

            let (symbol, instant, tick) = match read_row(&row, zone, selector, &mut decisions) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(err) => match options.row_errors {
                    RowErrorPolicy::FailFast => return Err(err),
                    RowErrorPolicy::SkipAndLog => {
                        tracing::warn!(row = stats.rows, error = %err, "skipping row");
                        stats.skipped += 1;
                        continue;
                    }
                },
            };

            let slot = columns.entry(instant).or_default();
            if slot.insert(symbol.to_string(), tick).is_some() {
                match options.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(TickrollError::DuplicateTick {
                            symbol: symbol.to_string(),
                            instant,
                        });
                    }
                    DuplicatePolicy::LastWriteWins => {
                        tracing::debug!(symbol, instant, "duplicate tick replaced");
                        stats.duplicates += 1;
                    }
                }
            }

            stats.selected += 1;
            if !symbols.contains(symbol) {
                symbols.insert(symbol.to_string());
            }
        }

        tracing::debug!(
            rows = stats.rows,
            selected = stats.selected,
            skipped = stats.skipped,
            duplicates = stats.duplicates,
            instants = columns.len(),
            symbols = symbols.len(),
            "built columnar index"
        );

        Ok(IndexBuild {
            index: Self { columns },
            symbols: symbols.into_iter().collect(),
            stats,
        })
    }

    /// Returns the tick for `symbol` at `instant`, if any.
    #[must_use]
    pub fn get(&self, instant: i64, symbol: &str) -> Option<&TickRecord> {
        self.columns.get(&instant)?.get(symbol)
    }

    /// Returns every symbol's tick at `instant`.
    #[must_use]
    pub fn at(&self, instant: i64) -> Option<&HashMap<String, TickRecord>> {
        self.columns.get(&instant)
    }

    /// Returns all instants in ascending order.
    pub fn instants(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        self.columns.keys().copied()
    }

    /// Returns `symbol`'s ticks in ascending instant order.
    pub fn series<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = (i64, &'a TickRecord)> + 'a {
        self.columns
            .iter()
            .filter_map(move |(&instant, row)| row.get(symbol).map(|tick| (instant, tick)))
    }

    /// Returns the earliest instant.
    #[must_use]
    pub fn first_instant(&self) -> Option<i64> {
        self.columns.keys().next().copied()
    }

    /// Returns the latest instant.
    #[must_use]
    pub fn last_instant(&self) -> Option<i64> {
        self.columns.keys().next_back().copied()
    }

    /// Returns the number of distinct instants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no rows were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Reads one row, returning `None` if the selector rejects its ticker.
fn read_row<'r, R, S>(
    row: &'r R,
    zone: &LocalZone,
    selector: &S,
    decisions: &mut HashMap<String, bool>,
) -> Result<Option<(&'r str, i64, TickRecord)>>
where
    R: RawRow,
    S: SymbolFilter + ?Sized,
{
    let symbol = row
        .field(columns::TICKER)
        .ok_or(TickrollError::MissingField(columns::TICKER))?;
    let accepted = match decisions.get(symbol) {
        Some(&accepted) => accepted,
        None => {
            let accepted = selector.accepts(symbol);
            decisions.insert(symbol.to_string(), accepted);
            accepted
        }
    };
    if !accepted {
        return Ok(None);
    }

    let raw_time = row
        .field(columns::DATE_TIME)
        .ok_or(TickrollError::MissingField(columns::DATE_TIME))?;
    let instant = zone.parse_instant(raw_time)?;
    let tick = TickRecord::from_row(row)?;

    Ok(Some((symbol, instant, tick)))
}
