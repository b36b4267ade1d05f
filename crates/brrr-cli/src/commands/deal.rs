use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use brrr_core::deal::calculator::{self, DealInput};

use crate::input;

/// Arguments for single-deal analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyseArgs {
    /// Property address or label
    #[arg(long, default_value = "")]
    pub address: String,

    /// Purchase price in pounds
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Deposit as a percentage of purchase price (e.g. 25)
    #[arg(long, alias = "deposit")]
    pub deposit_percent: Option<Decimal>,

    /// Refurbishment cost
    #[arg(long)]
    pub refurb_cost: Option<Decimal>,

    /// Expected monthly rent
    #[arg(long, alias = "rent")]
    pub rent_monthly: Option<Decimal>,

    /// Post-refurbishment valuation
    #[arg(long, alias = "value")]
    pub post_refurb_value: Option<Decimal>,

    /// Latitude (passed through to output)
    #[arg(long)]
    pub latitude: Option<Decimal>,

    /// Longitude (passed through to output)
    #[arg(long)]
    pub longitude: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl AnalyseArgs {
    fn to_deal_input(&self) -> Result<DealInput, Box<dyn std::error::Error>> {
        Ok(DealInput {
            address: self.address.clone(),
            purchase_price: self
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            deposit_percent: self.deposit_percent.unwrap_or(dec!(25)),
            refurb_cost: self.refurb_cost.unwrap_or(Decimal::ZERO),
            rent_monthly: self.rent_monthly.unwrap_or(Decimal::ZERO),
            post_refurb_value: self.post_refurb_value.unwrap_or(Decimal::ZERO),
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

pub fn run_analyse(args: AnalyseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal_input: DealInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if args.purchase_price.is_some() {
        args.to_deal_input()?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.to_deal_input()?
    };

    let result = calculator::analyse_deal(&deal_input)?;
    log::info!(
        "Analysed '{}': yield {}%, ROI {}%",
        result.result.address,
        result.result.yield_percent.round_dp(2),
        result.result.roi_percent.round_dp(2)
    );
    Ok(serde_json::to_value(result)?)
}
