//! tickroll CLI - Ticker classification and OHLC rollups for tick CSV exports.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickroll_lib::prelude::*;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "tickroll")]
#[command(about = "Ticker classification and OHLC rollups for tick CSV exports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll CSV batches up into OHLC series files
    Dump {
        /// CSV files, or directories holding them directly or in monthly/ and weekly/ folders
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// JSON pipeline configuration; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Symbol profile (nifty-derivatives, nifty-expiry, nifty-weekly, all)
        #[arg(short, long)]
        profile: Option<Profile>,

        /// Comma-separated rollup timeframes (e.g. 1m,3m,5m)
        #[arg(short, long, value_delimiter = ',')]
        timeframes: Option<Vec<Timeframe>>,

        /// Zone of the Date/Time column (IST, UTC or an offset like +05:30)
        #[arg(short, long)]
        zone: Option<LocalZone>,

        /// Output format (json, ndjson, csv, parquet)
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output layout (by-expiry, by-kind)
        #[arg(short, long, default_value = "by-expiry")]
        layout: LayoutStyle,

        /// Number of files read ahead
        #[arg(long, default_value = "4")]
        parallel: usize,

        /// Skip unparsable rows instead of failing the batch
        #[arg(long)]
        skip_bad_rows: bool,

        /// Fail on repeated (instant, symbol) rows instead of keeping the last
        #[arg(long)]
        reject_duplicates: bool,

        /// Take the expiry kind from the weekly/ or monthly/ folder name
        #[arg(long)]
        trust_dirs: bool,
    },

    /// Classify raw ticker symbols
    Classify {
        /// Symbols to classify (e.g. NIFTY-FUT NIFTYWK15500PE)
        #[arg(required = true)]
        symbols: Vec<String>,
    },

    /// List the symbols in a CSV file
    Symbols {
        /// CSV file to scan
        file: PathBuf,

        /// Symbol profile to apply
        #[arg(short, long)]
        profile: Option<Profile>,

        /// List every symbol, ignoring the profile
        #[arg(long)]
        all: bool,
    },
}

/// Installs the tracing subscriber; `RUST_LOG` wins over the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Dump {
            inputs,
            output_dir,
            config,
            profile,
            timeframes,
            zone,
            format,
            layout,
            parallel,
            skip_bad_rows,
            reject_duplicates,
            trust_dirs,
        } => {
            let overrides = commands::dump::Overrides {
                profile,
                timeframes,
                zone,
                skip_bad_rows,
                reject_duplicates,
                trust_dirs,
            };
            let config = commands::dump::load_config(config.as_deref(), overrides)?;
            let layout = OutputLayout::new(output_dir, layout, format);
            commands::dump::dump(&inputs, config, layout, parallel, cli.quiet).await
        }
        Commands::Classify { symbols } => commands::classify::classify_symbols(&symbols),
        Commands::Symbols { file, profile, all } => {
            commands::symbols::list_symbols(&file, profile, all).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dump_flags() {
        let cli = Cli::parse_from([
            "tickroll",
            "dump",
            "in/monthly",
            "--timeframes",
            "1m,15m",
            "--zone",
            "UTC",
            "--layout",
            "by-kind",
            "--profile",
            "all",
        ]);

        let Some(Commands::Dump {
            inputs,
            timeframes,
            zone,
            layout,
            profile,
            format,
            ..
        }) = cli.command
        else {
            panic!("expected dump");
        };
        assert_eq!(inputs, vec![PathBuf::from("in/monthly")]);
        assert_eq!(timeframes, Some(vec![Timeframe::MINUTE_1, Timeframe::MINUTE_15]));
        assert_eq!(zone, Some(LocalZone::UTC));
        assert_eq!(layout, LayoutStyle::ByKind);
        assert_eq!(profile, Some(Profile::All));
        assert_eq!(format, OutputFormat::Json);
    }
}
