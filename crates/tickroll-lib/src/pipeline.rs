//! Batch processing: index, expiry, rollups.

use tickroll_aggregate::{
    BatchExpiry, BuildStats, ColumnarIndex, ExpiryIndex, IndexBuild, OhlcAggregator, OhlcBucket,
};
use tickroll_classify::ClassifierCache;
use tickroll_format::SeriesDocument;
use tickroll_ingest::LoadedBatch;
use tickroll_types::{ExpiryKind, RawRow, Result, TickerIdentity, Timeframe};

use crate::PipelineConfig;

/// Rollups of one symbol.
#[derive(Debug, Clone)]
pub struct SymbolSeries {
    /// Identity of the symbol.
    pub identity: TickerIdentity,
    /// One bucket sequence per configured timeframe.
    pub rollups: Vec<(Timeframe, Vec<OhlcBucket>)>,
}

impl SymbolSeries {
    /// Builds one output document per rollup.
    pub fn documents<'a>(
        &'a self,
        expiry: &'a BatchExpiry,
    ) -> impl Iterator<Item = (Timeframe, SeriesDocument)> + 'a {
        self.rollups.iter().map(move |(timeframe, buckets)| {
            (
                *timeframe,
                SeriesDocument::new(&self.identity, expiry.date, *timeframe, buckets),
            )
        })
    }
}

/// Everything derived from one batch.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Expiry date and kind of the batch.
    pub expiry: BatchExpiry,
    /// Rollups for each selected symbol, in symbol order.
    pub series: Vec<SymbolSeries>,
    /// Row counts from the index build.
    pub stats: BuildStats,
}

impl BatchOutput {
    /// Returns the identities of every selected symbol.
    pub fn identities(&self) -> impl Iterator<Item = &TickerIdentity> {
        self.series.iter().map(|s| &s.identity)
    }

    /// Records this batch's expiry under each underlying it covers.
    pub fn record_into(&self, index: &mut ExpiryIndex) {
        for identity in self.identities() {
            index.record(identity.underlying(), self.expiry.date, self.expiry.kind);
        }
    }

    /// Returns the total number of buckets across all series.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| &s.rollups)
            .map(|(_, buckets)| buckets.len())
            .sum()
    }
}

/// Runs batches through the index builder and aggregator.
///
/// Classifications are cached across batches, since consecutive files share
/// most of their symbols.
#[derive(Debug)]
pub struct BatchProcessor {
    config: PipelineConfig,
    cache: ClassifierCache,
}

impl BatchProcessor {
    /// Creates a processor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache: ClassifierCache::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes one batch of rows.
    ///
    /// `hint` is the expiry kind stated by the input folder; it is used only
    /// when [`PipelineConfig::trust_directory_hint`] is set. Returns `None`
    /// when no row survives the allow-list.
    ///
    /// # Errors
    ///
    /// Returns row errors under the fail-fast policy and duplicate errors
    /// under the rejecting policy.
    pub fn process<I>(&mut self, rows: I, hint: Option<ExpiryKind>) -> Result<Option<BatchOutput>>
    where
        I: IntoIterator,
        I::Item: RawRow,
    {
        let IndexBuild {
            index,
            symbols,
            stats,
        } = ColumnarIndex::build(
            rows,
            &self.config.zone,
            &self.config.allow_list,
            self.config.build_options(),
        )?;

        let policy = self.config.expiry_policy(hint);
        let Some(expiry) = BatchExpiry::detect(index.instants(), &self.config.zone, &*policy)
        else {
            tracing::warn!(rows = stats.rows, "no selected rows in batch");
            return Ok(None);
        };

        let mut series = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            let identity = self.cache.get_or_classify(symbol)?.clone();
            let rollups = self
                .config
                .timeframes
                .iter()
                .map(|&timeframe| {
                    let buckets = OhlcAggregator::new(timeframe).rollup(&index, symbol);
                    (timeframe, buckets)
                })
                .collect();
            series.push(SymbolSeries { identity, rollups });
        }

        tracing::info!(
            expiry = %expiry.date,
            kind = %expiry.kind,
            trading_days = expiry.trading_days,
            symbols = series.len(),
            rows = stats.selected,
            skipped = stats.skipped,
            "processed batch"
        );

        Ok(Some(BatchOutput {
            expiry,
            series,
            stats,
        }))
    }

    /// Processes a loaded batch file, using its folder as the expiry hint.
    ///
    /// # Errors
    ///
    /// See [`Self::process`].
    pub fn process_loaded(&mut self, batch: &LoadedBatch) -> Result<Option<BatchOutput>> {
        self.process(&batch.rows, batch.file.expiry_hint)
    }
}
