//! Display utilities for the tickroll CLI.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tickroll_lib::prelude::*;

/// Creates a progress bar over `len` batch files, hidden in quiet mode.
pub(crate) fn batch_progress(len: u64, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}",
            )?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Formats an identity as one row of the classification table.
pub(crate) fn identity_row(identity: &TickerIdentity) -> String {
    let strike = identity
        .strike()
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    let option_type = identity.option_type().map_or("-", |t| t.as_str());
    format!(
        "{:<24} {:<8} {:<14} {:>8} {:<4}",
        identity.raw_symbol(),
        identity.kind().as_str(),
        identity.underlying(),
        strike,
        option_type
    )
}

/// Prints the header of the classification table.
pub(crate) fn print_identity_header() {
    println!(
        "{:<24} {:<8} {:<14} {:>8} {:<4}",
        "SYMBOL", "KIND", "UNDERLYING", "STRIKE", "TYPE"
    );
    println!("{}", "-".repeat(62));
}
