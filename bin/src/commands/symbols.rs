//! Symbols command implementation.
//!
//! Lists the distinct tickers of one CSV file with their classification.

use crate::display::{identity_row, print_identity_header};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tickroll_lib::prelude::*;
use tickroll_lib::{ClassifierCache, columns, read_rows};

/// Lists the symbols of `file` that pass the profile, or all of them.
pub(crate) async fn list_symbols(file: &Path, profile: Option<Profile>, all: bool) -> Result<()> {
    let rows = read_rows(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let allow_list = if all {
        AllowList::everything()
    } else {
        profile.unwrap_or_default().allow_list()
    };
    let symbols: BTreeSet<&str> = rows
        .iter()
        .filter_map(|row| row.get(columns::TICKER))
        .map(String::as_str)
        .filter(|symbol| allow_list.allows(symbol))
        .collect();

    if symbols.is_empty() {
        println!("No symbols found.");
        return Ok(());
    }

    print_identity_header();
    let mut cache = ClassifierCache::new();
    for symbol in &symbols {
        let identity = cache.get_or_classify(symbol)?;
        println!("{}", identity_row(identity));
    }

    println!("\nTotal: {} symbols", symbols.len());
    Ok(())
}
