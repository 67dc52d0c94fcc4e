//! Dump command implementation.
//!
//! Discovers CSV batches, rolls each one up and writes the series, symbol
//! lists and expiry index under the output layout.

use crate::display::batch_progress;
use anyhow::{Context, Result, bail};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tickroll_lib::prelude::*;
use tickroll_lib::{DuplicatePolicy, RowErrorPolicy};

/// Command-line settings that override the configuration file.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) profile: Option<Profile>,
    pub(crate) timeframes: Option<Vec<Timeframe>>,
    pub(crate) zone: Option<LocalZone>,
    pub(crate) skip_bad_rows: bool,
    pub(crate) reject_duplicates: bool,
    pub(crate) trust_dirs: bool,
}

/// Loads the configuration file, if any, and applies the flag overrides.
pub(crate) fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(profile) = overrides.profile {
        config = config.with_profile(profile);
    }
    if let Some(timeframes) = overrides.timeframes {
        config = config.with_timeframes(timeframes);
    }
    if let Some(zone) = overrides.zone {
        config = config.with_zone(zone);
    }
    if overrides.skip_bad_rows {
        config.row_errors = RowErrorPolicy::SkipAndLog;
    }
    if overrides.reject_duplicates {
        config.duplicates = DuplicatePolicy::Reject;
    }
    if overrides.trust_dirs {
        config.trust_directory_hint = true;
    }

    config.validate()?;
    Ok(config)
}

/// Totals reported when the dump finishes.
#[derive(Debug, Default)]
struct Summary {
    batches: usize,
    empty: usize,
    files: usize,
    buckets: usize,
}

/// Rolls up every batch found under `inputs`.
pub(crate) async fn dump(
    inputs: &[PathBuf],
    config: PipelineConfig,
    mut layout: OutputLayout,
    parallel: usize,
    quiet: bool,
) -> Result<()> {
    let files = discover_batches(inputs)
        .await
        .context("Failed to discover input files")?;
    if files.is_empty() {
        bail!("No CSV files found under the given inputs");
    }
    tracing::info!(
        files = files.len(),
        format = %layout.format(),
        layout = %layout.style(),
        "starting dump"
    );

    let progress = batch_progress(files.len() as u64, quiet)?;
    let mut processor = BatchProcessor::new(config)?;
    let mut expiries = ExpiryIndex::new();
    let mut summary = Summary::default();

    let mut batches = std::pin::pin!(batch_stream(files, parallel));
    while let Some(batch) = batches.next().await {
        let batch = batch?;
        progress.set_message(batch.file.name());

        let output = processor
            .process_loaded(&batch)
            .with_context(|| format!("Failed to process {}", batch.file.path.display()))?;
        summary.batches += 1;

        match output {
            Some(output) => {
                if batch
                    .file
                    .file_date
                    .is_some_and(|date| date != output.expiry.date)
                {
                    tracing::warn!(
                        file = %batch.file.name(),
                        expiry = %output.expiry.date,
                        "file name date differs from last trading day"
                    );
                }
                summary.files += write_batch(&mut layout, &output)
                    .with_context(|| format!("Failed to write {}", batch.file.name()))?;
                summary.buckets += output.bucket_count();
                output.record_into(&mut expiries);
            }
            None => summary.empty += 1,
        }
        progress.inc(1);
    }

    expiries.remove_underlyings(&processor.config().ignore_underlyings);
    layout
        .write_expiry_index(&expiries)
        .context("Failed to write expiry index")?;

    let mut finish_msg = format!(
        "Wrote {} series files ({} buckets) from {} batches",
        summary.files, summary.buckets, summary.batches
    );
    if summary.empty > 0 {
        finish_msg.push_str(&format!(" ({} had no selected rows)", summary.empty));
    }
    progress.finish_with_message(finish_msg);

    if !quiet {
        println!("Output written to: {}", layout.root().display());
    }

    Ok(())
}

/// Writes one batch's series and symbol lists, returning the series count.
fn write_batch(layout: &mut OutputLayout, output: &BatchOutput) -> Result<usize> {
    let mut written = 0;
    for series in &output.series {
        for (timeframe, document) in series.documents(&output.expiry) {
            layout.write_series(&series.identity, output.expiry.date, timeframe, &document)?;
            written += 1;
        }
    }
    layout.write_symbols(output.identities(), &output.expiry)?;
    Ok(written)
}
