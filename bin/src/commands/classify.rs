//! Classify command implementation.

use crate::display::{identity_row, print_identity_header};
use anyhow::{Result, bail};
use tickroll_lib::prelude::*;

/// Prints the classification of each symbol.
pub(crate) fn classify_symbols(symbols: &[String]) -> Result<()> {
    print_identity_header();

    let mut failures = 0;
    for symbol in symbols {
        match classify(symbol) {
            Ok(identity) => println!("{}", identity_row(&identity)),
            Err(e) => {
                eprintln!("{e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} symbols could not be classified", symbols.len());
    }
    Ok(())
}
