mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use std::process;

use commands::deal::AnalyseArgs;
use commands::portfolio::{ImportArgs, ScreenArgs};

/// Buy-refurbish-refinance property deal analysis
#[derive(Parser)]
#[command(
    name = "brrr",
    version,
    about = "Buy-refurbish-refinance property deal analysis",
    long_about = "A CLI for analysing UK buy-refurbish-refinance (BRRR) property deals \
                  with decimal precision. Computes stamp duty, fees, gross yield, \
                  refinance proceeds, cash left in and cash-on-cash ROI, and screens \
                  batches of deals against investment thresholds."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a single deal
    Analyse(AnalyseArgs),
    /// Compute every deal in a CSV or JSON file
    Import(ImportArgs),
    /// Compute and filter deals against ROI, yield and cash-left-in thresholds
    Screen(ScreenArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            });
        }
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyse(args) => commands::deal::run_analyse(args),
        Commands::Import(args) => commands::portfolio::run_import(args),
        Commands::Screen(args) => commands::portfolio::run_screen(args),
        Commands::Version => {
            println!("brrr {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("Command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
