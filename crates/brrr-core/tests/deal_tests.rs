use brrr_core::deal::calculator::{compute, DealInput, STANDARD_FEES};
use brrr_core::deal::filter::{filter, DealThresholds};
use brrr_core::stamp_duty;
use brrr_core::{analyse_deal, BrrrError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(price: Decimal, deposit_pct: Decimal, refurb: Decimal, rent: Decimal, value: Decimal) -> DealInput {
    DealInput {
        address: String::new(),
        purchase_price: price,
        deposit_percent: deposit_pct,
        refurb_cost: refurb,
        rent_monthly: rent,
        post_refurb_value: value,
        latitude: None,
        longitude: None,
    }
}

// ===========================================================================
// Reference deals
// ===========================================================================

#[test]
fn test_reference_deal_middle_band() {
    let r = compute(&input(dec!(200000), dec!(25), dec!(20000), dec!(1200), dec!(260000)));
    assert_eq!(r.deposit, dec!(50000));
    assert_eq!(r.stamp_duty, dec!(9750));
    assert_eq!(r.total_fees, dec!(83050));
    assert_eq!(r.annual_rent, dec!(14400));
    assert_eq!(r.yield_percent, dec!(7.2));
    assert_eq!(r.remortgage_amount, dec!(195000));
    assert_eq!(r.cash_left_in, dec!(-110450));
    assert_eq!(r.roi_percent, Decimal::ZERO);
}

#[test]
fn test_reference_deal_nil_band() {
    let r = compute(&input(dec!(100000), dec!(20), dec!(0), dec!(600), dec!(90000)));
    assert_eq!(r.stamp_duty, dec!(3000));
    assert_eq!(r.deposit, dec!(20000));
    assert_eq!(r.total_fees, dec!(26300));
    assert_eq!(r.annual_rent, dec!(7200));
    assert_eq!(r.yield_percent, dec!(7.2));
    assert_eq!(r.remortgage_amount, dec!(67500));
    assert_eq!(r.cash_left_in, dec!(-39700));
    assert_eq!(r.roi_percent, Decimal::ZERO);
}

#[test]
fn test_upper_band_deal_with_cash_left_in() {
    // Stamp duty: 0.05 * 50000 + 3375 + 0.03 * 300000 = 14875
    // Fees: 75000 + 14875 + 30000 + 3300 = 123175
    // Remortgage: 320000 * 0.75 = 240000
    // Cash left in: 123175 - 238500 = -115325
    let r = compute(&input(dec!(300000), dec!(25), dec!(30000), dec!(1500), dec!(320000)));
    assert_eq!(r.stamp_duty, dec!(14875));
    assert_eq!(r.total_fees, dec!(123175));
    assert_eq!(r.cash_left_in, dec!(-115325));
    assert_eq!(r.cash_out, dec!(-90000));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_deposit_exact_for_all_percents() {
    for pct in 0..=100 {
        let pct = Decimal::from(pct);
        let r = compute(&input(dec!(187500), pct, dec!(0), dec!(0), dec!(0)));
        assert_eq!(r.deposit, dec!(187500) * pct / dec!(100));
    }
}

#[test]
fn test_roi_zero_whenever_cash_left_in_non_positive() {
    for rent in [dec!(0), dec!(500), dec!(5000), dec!(50000)] {
        let r = compute(&input(dec!(150000), dec!(25), dec!(10000), rent, dec!(250000)));
        assert!(r.cash_left_in <= Decimal::ZERO);
        assert_eq!(r.roi_percent, Decimal::ZERO);
    }
}

#[test]
fn test_cash_left_in_identity_across_prices() {
    for price in [dec!(0), dec!(90000), dec!(125000), dec!(180000), dec!(250000), dec!(420000)] {
        let r = compute(&input(price, dec!(30), dec!(12000), dec!(800), dec!(150000)));
        assert_eq!(
            r.cash_left_in,
            r.total_fees - r.remortgage_amount + STANDARD_FEES.mortgage_fee
        );
        assert_eq!(r.stamp_duty, stamp_duty::stamp_duty(price));
    }
}

// ===========================================================================
// Filtering computed deals
// ===========================================================================

#[test]
fn test_screen_computed_deals() {
    let records: Vec<_> = [
        input(dec!(100000), dec!(25), dec!(10000), dec!(750), dec!(40000)),
        input(dec!(200000), dec!(25), dec!(20000), dec!(1200), dec!(260000)),
        input(dec!(80000), dec!(25), dec!(5000), dec!(700), dec!(30000)),
    ]
    .iter()
    .map(compute)
    .collect();

    let t = DealThresholds {
        min_roi: dec!(10),
        min_yield: dec!(5),
        max_cash_left_in: dec!(15000),
    };
    let kept = filter(&records, &t);

    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].purchase_price, dec!(100000));
    assert_eq!(kept[1].purchase_price, dec!(80000));
    assert_eq!(filter(&kept, &t), kept);
}

// ===========================================================================
// Validation through the analysis envelope
// ===========================================================================

#[test]
fn test_analyse_rejects_negative_rent() {
    let bad = input(dec!(100000), dec!(25), dec!(0), dec!(-1), dec!(0));
    match analyse_deal(&bad) {
        Err(BrrrError::InvalidInput { field, .. }) => assert_eq!(field, "rent_monthly"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_deal_input_from_json_numbers() {
    let json = r#"{
        "address": "4 Mill Lane",
        "purchase_price": 200000,
        "deposit_percent": 25,
        "refurb_cost": 20000,
        "rent_monthly": 1200,
        "post_refurb_value": 260000
    }"#;
    let parsed: DealInput = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.purchase_price, dec!(200000));
    assert_eq!(parsed.latitude, None);
    assert_eq!(compute(&parsed).stamp_duty, dec!(9750));
}
