use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BrrrError;
use crate::stamp_duty::{self, ADDITIONAL_PROPERTY_SURCHARGE};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::BrrrResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed transaction costs and financing terms applied to every deal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Arrangement fee on the refinance mortgage
    pub mortgage_fee: Money,
    /// Conveyancing / solicitor fees
    pub legal_fee: Money,
    /// Valuation survey
    pub survey_fee: Money,
    /// Loan-to-value achieved on refinance (0.75 = 75%)
    pub refinance_loan_to_value: Rate,
    /// Stamp duty surcharge on additional properties
    pub additional_property_surcharge: Rate,
}

impl FeeSchedule {
    pub const fn standard() -> Self {
        FeeSchedule {
            mortgage_fee: dec!(1500),
            legal_fee: dec!(1200),
            survey_fee: dec!(600),
            refinance_loan_to_value: dec!(0.75),
            additional_property_surcharge: ADDITIONAL_PROPERTY_SURCHARGE,
        }
    }

    /// Mortgage, legal and survey fees combined.
    pub fn fixed_costs(&self) -> Money {
        self.mortgage_fee + self.legal_fee + self.survey_fee
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// The fee schedule every computation uses.
pub const STANDARD_FEES: FeeSchedule = FeeSchedule::standard();

/// Largest currency amount accepted at the boundary. Keeps every
/// intermediate product well inside Decimal's 96-bit range.
pub const MAX_AMOUNT: Money = dec!(1000000000000);

/// Caller-provided description of a single purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInput {
    /// Property label, not used in any calculation
    #[serde(default)]
    pub address: String,
    /// Agreed purchase price
    pub purchase_price: Money,
    /// Deposit as a percentage of the purchase price (25 = 25%)
    pub deposit_percent: Percent,
    /// Refurbishment budget
    #[serde(default)]
    pub refurb_cost: Money,
    /// Expected rent per calendar month
    #[serde(default)]
    pub rent_monthly: Money,
    /// Expected valuation once refurbished
    #[serde(default)]
    pub post_refurb_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Decimal>,
}

/// Derived economics of a deal. Built only by [`compute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub address: String,
    pub purchase_price: Money,
    pub deposit_percent: Percent,
    pub refurb_cost: Money,
    pub rent_monthly: Money,
    pub post_refurb_value: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Decimal>,
    /// purchase_price * deposit_percent / 100
    pub deposit: Money,
    /// Tiered stamp duty plus additional-property surcharge
    pub stamp_duty: Money,
    /// Deposit, stamp duty, refurb and fixed fees
    pub total_fees: Money,
    /// rent_monthly * 12
    pub annual_rent: Money,
    /// Gross yield on purchase price; 0 when the price is 0
    pub yield_percent: Percent,
    /// Refinance proceeds at the standard loan-to-value
    pub remortgage_amount: Money,
    /// Refinance proceeds less purchase and refurb
    pub cash_out: Money,
    /// Money still tied up after refinancing
    pub cash_left_in: Money,
    /// Cash-on-cash return; 0 when no cash is left in
    pub roi_percent: Percent,
}

impl DealRecord {
    /// The input this record was computed from.
    pub fn input(&self) -> DealInput {
        DealInput {
            address: self.address.clone(),
            purchase_price: self.purchase_price,
            deposit_percent: self.deposit_percent,
            refurb_cost: self.refurb_cost,
            rent_monthly: self.rent_monthly,
            post_refurb_value: self.post_refurb_value,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the full set of deal figures from an input.
///
/// Total over all numeric input: zero values never fail. A zero purchase
/// price yields `yield_percent = 0`, and a non-positive `cash_left_in`
/// yields `roi_percent = 0`. No rounding is applied. Ratios that would
/// overflow (a vanishingly small denominator) saturate at `Decimal::MAX`.
pub fn compute(input: &DealInput) -> DealRecord {
    let fees = &STANDARD_FEES;

    let deposit = input.purchase_price * input.deposit_percent / dec!(100);
    let stamp_duty = stamp_duty::stamp_duty(input.purchase_price);
    let total_fees = deposit + stamp_duty + input.refurb_cost + fees.fixed_costs();

    let annual_rent = input.rent_monthly * dec!(12);
    let yield_percent = if input.purchase_price.is_zero() {
        Decimal::ZERO
    } else {
        percent_of(annual_rent, input.purchase_price)
    };

    let remortgage_amount = input.post_refurb_value * fees.refinance_loan_to_value;
    let cash_out = remortgage_amount - (input.purchase_price + input.refurb_cost);
    let cash_left_in = total_fees - (remortgage_amount - fees.mortgage_fee);
    let roi_percent = if cash_left_in > Decimal::ZERO {
        percent_of(annual_rent, cash_left_in)
    } else {
        Decimal::ZERO
    };

    DealRecord {
        address: input.address.clone(),
        purchase_price: input.purchase_price,
        deposit_percent: input.deposit_percent,
        refurb_cost: input.refurb_cost,
        rent_monthly: input.rent_monthly,
        post_refurb_value: input.post_refurb_value,
        latitude: input.latitude,
        longitude: input.longitude,
        deposit,
        stamp_duty,
        total_fees,
        annual_rent,
        yield_percent,
        remortgage_amount,
        cash_out,
        cash_left_in,
        roi_percent,
    }
}

/// `numerator / denominator * 100`, saturating instead of overflowing.
fn percent_of(numerator: Money, denominator: Money) -> Percent {
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(if numerator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Validate, compute and wrap a single deal with warnings and metadata.
pub fn analyse_deal(input: &DealInput) -> BrrrResult<ComputationOutput<DealRecord>> {
    let start = Instant::now();

    validate_deal_input(input)?;
    let record = compute(input);
    let warnings = deal_warnings(&record);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "BRRR Deal Analysis (UK additional-property stamp duty, 75% LTV refinance)",
        &STANDARD_FEES,
        warnings,
        elapsed,
        record,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Boundary checks for a deal input. [`compute`] itself never calls this.
pub fn validate_deal_input(input: &DealInput) -> BrrrResult<()> {
    let non_negative = [
        ("purchase_price", input.purchase_price),
        ("refurb_cost", input.refurb_cost),
        ("rent_monthly", input.rent_monthly),
        ("post_refurb_value", input.post_refurb_value),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(BrrrError::InvalidInput {
                field: field.into(),
                reason: format!("Must be non-negative, got {value}"),
            });
        }
        if value > MAX_AMOUNT {
            return Err(BrrrError::InvalidInput {
                field: field.into(),
                reason: format!("Must not exceed {MAX_AMOUNT}, got {value}"),
            });
        }
    }

    if input.deposit_percent < Decimal::ZERO || input.deposit_percent > dec!(100) {
        return Err(BrrrError::InvalidInput {
            field: "deposit_percent".into(),
            reason: format!(
                "Deposit percent must be between 0 and 100, got {}",
                input.deposit_percent
            ),
        });
    }

    if let Some(lat) = input.latitude {
        if lat.abs() > dec!(90) {
            return Err(BrrrError::InvalidInput {
                field: "latitude".into(),
                reason: format!("Latitude must be between -90 and 90, got {lat}"),
            });
        }
    }

    if let Some(lon) = input.longitude {
        if lon.abs() > dec!(180) {
            return Err(BrrrError::InvalidInput {
                field: "longitude".into(),
                reason: format!("Longitude must be between -180 and 180, got {lon}"),
            });
        }
    }

    Ok(())
}

fn deal_warnings(record: &DealRecord) -> Vec<String> {
    let mut warnings = Vec::new();

    if record.purchase_price.is_zero() {
        warnings.push("Purchase price is zero; gross yield reported as 0".to_string());
    }

    if record.deposit_percent < dec!(10) || record.deposit_percent > dec!(50) {
        warnings.push(format!(
            "Deposit of {}% is outside the usual 10–50% range for buy-to-let lending",
            record.deposit_percent
        ));
    }

    if record.cash_left_in <= Decimal::ZERO {
        warnings.push(format!(
            "Refinance recovers all cash invested (cash left in {}); ROI reported as 0",
            record.cash_left_in
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
