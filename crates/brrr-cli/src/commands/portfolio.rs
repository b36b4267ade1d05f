use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use brrr_core::deal::filter::DealThresholds;
use brrr_core::portfolio::{self, PortfolioOutput};
use brrr_core::ComputationOutput;

use crate::input;
use crate::output::export;

/// Arguments for bulk import
#[derive(Args)]
pub struct ImportArgs {
    /// Path to a CSV (or .json array) of deals
    #[arg(long)]
    pub file: String,

    /// Also write a formatted CSV export to this path
    #[arg(long)]
    pub export: Option<String>,
}

/// Arguments for screening deals against investment thresholds
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScreenArgs {
    /// Path to a CSV (or .json array) of deals
    #[arg(long)]
    pub file: String,

    /// Minimum cash-on-cash ROI in percent
    #[arg(long, default_value = "0")]
    pub min_roi: Decimal,

    /// Minimum gross yield in percent
    #[arg(long, default_value = "0")]
    pub min_yield: Decimal,

    /// Maximum cash left in after refinancing (unbounded if omitted)
    #[arg(long)]
    pub max_cash_left_in: Option<Decimal>,

    /// Also write a formatted CSV export of matching deals to this path
    #[arg(long)]
    pub export: Option<String>,
}

impl ScreenArgs {
    fn thresholds(&self) -> DealThresholds {
        DealThresholds {
            min_roi: self.min_roi,
            min_yield: self.min_yield,
            max_cash_left_in: self.max_cash_left_in.unwrap_or(Decimal::MAX),
        }
    }
}

pub fn run_import(args: ImportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deals = input::file::read_deals(&args.file)?;
    let result = portfolio::analyse_portfolio(&deals, None)?;
    finish(result, args.export.as_deref())
}

pub fn run_screen(args: ScreenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deals = input::file::read_deals(&args.file)?;
    let thresholds = args.thresholds();
    let result = portfolio::analyse_portfolio(&deals, Some(&thresholds))?;
    log::info!(
        "{} of {} deals meet the thresholds",
        result.result.summary.matched_count,
        result.result.summary.deal_count
    );
    finish(result, args.export.as_deref())
}

fn finish(
    result: ComputationOutput<PortfolioOutput>,
    export_path: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = export_path {
        export::export_to_path(path, &result.result.records)?;
    }
    Ok(serde_json::to_value(result)?)
}
