use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deal::calculator::{
    compute, validate_deal_input, DealInput, DealRecord, FeeSchedule, STANDARD_FEES,
};
use crate::deal::filter::{filter, DealThresholds};
use crate::error::BrrrError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::BrrrResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A row that failed boundary validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedDeal {
    /// Zero-based position in the submitted batch
    pub row: usize,
    pub address: String,
    pub reason: String,
}

/// Aggregates over the returned records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Rows that passed validation
    pub deal_count: usize,
    /// Records returned (after filtering, when thresholds were given)
    pub matched_count: usize,
    pub total_cash_left_in: Money,
    pub total_annual_rent: Money,
    pub average_yield_percent: Percent,
    pub average_roi_percent: Percent,
}

/// Output of a bulk analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioOutput {
    pub records: Vec<DealRecord>,
    pub rejected: Vec<RejectedDeal>,
    pub summary: PortfolioSummary,
}

#[derive(Serialize)]
struct PortfolioAssumptions<'a> {
    fees: &'a FeeSchedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    thresholds: Option<&'a DealThresholds>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute every deal in a batch and optionally screen the results.
///
/// Invalid rows are collected in `rejected` rather than failing the batch.
/// An empty batch is an error.
pub fn analyse_portfolio(
    inputs: &[DealInput],
    thresholds: Option<&DealThresholds>,
) -> BrrrResult<ComputationOutput<PortfolioOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if inputs.is_empty() {
        return Err(BrrrError::InsufficientData(
            "At least one deal is required for portfolio analysis".into(),
        ));
    }

    let mut computed = Vec::with_capacity(inputs.len());
    let mut rejected = Vec::new();
    for (row, input) in inputs.iter().enumerate() {
        match validate_deal_input(input) {
            Ok(()) => computed.push(compute(input)),
            Err(e) => rejected.push(RejectedDeal {
                row,
                address: input.address.clone(),
                reason: e.to_string(),
            }),
        }
    }

    log::debug!(
        "Computed {} deals, rejected {} of {} rows",
        computed.len(),
        rejected.len(),
        inputs.len()
    );

    if !rejected.is_empty() {
        warnings.push(format!(
            "{} of {} rows failed validation and were skipped",
            rejected.len(),
            inputs.len()
        ));
    }

    let zero_priced = computed.iter().filter(|r| r.purchase_price.is_zero()).count();
    if zero_priced > 0 {
        warnings.push(format!(
            "{zero_priced} deals have a zero purchase price; gross yield reported as 0"
        ));
    }

    let deal_count = computed.len();
    let records = match thresholds {
        Some(t) => filter(&computed, t),
        None => computed,
    };

    if thresholds.is_some() && records.is_empty() && deal_count > 0 {
        warnings.push("No deals meet the supplied thresholds".to_string());
    }

    let summary = summarise(&records, deal_count);
    let output = PortfolioOutput {
        records,
        rejected,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "BRRR Portfolio Screening",
        &PortfolioAssumptions {
            fees: &STANDARD_FEES,
            thresholds,
        },
        warnings,
        elapsed,
        output,
    ))
}

fn summarise(records: &[DealRecord], deal_count: usize) -> PortfolioSummary {
    let total_cash_left_in: Money = records.iter().map(|r| r.cash_left_in).sum();
    let total_annual_rent: Money = records.iter().map(|r| r.annual_rent).sum();

    let (average_yield_percent, average_roi_percent) = if records.is_empty() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let n = Decimal::from(records.len());
        let yield_sum: Decimal = records.iter().map(|r| r.yield_percent).sum();
        let roi_sum: Decimal = records.iter().map(|r| r.roi_percent).sum();
        (yield_sum / n, roi_sum / n)
    };

    PortfolioSummary {
        deal_count,
        matched_count: records.len(),
        total_cash_left_in,
        total_annual_rent,
        average_yield_percent,
        average_roi_percent,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
