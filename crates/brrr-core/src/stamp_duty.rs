use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Price above which the upper band applies.
pub const UPPER_THRESHOLD: Money = dec!(250000);
/// Price above which the middle band applies.
pub const MIDDLE_THRESHOLD: Money = dec!(125000);
/// Marginal rate charged in both the middle and upper bands.
pub const BAND_RATE: Rate = dec!(0.05);
/// Flat amount added once the price crosses the upper threshold
/// (0.05 x 67500 = 3375). Not derived from the thresholds above.
pub const UPPER_BAND_FLAT: Money = dec!(3375);
/// Additional-property surcharge applied to the whole price.
pub const ADDITIONAL_PROPERTY_SURCHARGE: Rate = dec!(0.03);

/// Stamp duty band a purchase price falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StampDutyBand {
    /// Price at or below 125,000: surcharge only
    Nil,
    /// 125,000 < price <= 250,000
    Middle,
    /// Price above 250,000
    Upper,
}

/// Stamp duty split into its tiered and surcharge components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampDutyBreakdown {
    pub band: StampDutyBand,
    pub tiered: Money,
    pub surcharge: Money,
    pub total: Money,
}

/// Classify a purchase price. Bands are checked top-down.
pub fn band_for(purchase_price: Money) -> StampDutyBand {
    if purchase_price > UPPER_THRESHOLD {
        StampDutyBand::Upper
    } else if purchase_price > MIDDLE_THRESHOLD {
        StampDutyBand::Middle
    } else {
        StampDutyBand::Nil
    }
}

/// Tiered tax plus the flat additional-property surcharge.
///
/// Upper:  0.05 * (price - 250000) + 3375
/// Middle: 0.05 * (price - 125000)
/// Nil:    0
///
/// The surcharge `0.03 * price` is then added regardless of band.
pub fn breakdown(purchase_price: Money) -> StampDutyBreakdown {
    let band = band_for(purchase_price);
    let tiered = match band {
        StampDutyBand::Upper => BAND_RATE * (purchase_price - UPPER_THRESHOLD) + UPPER_BAND_FLAT,
        StampDutyBand::Middle => BAND_RATE * (purchase_price - MIDDLE_THRESHOLD),
        StampDutyBand::Nil => Decimal::ZERO,
    };
    let surcharge = ADDITIONAL_PROPERTY_SURCHARGE * purchase_price;

    log::debug!("Stamp duty band {band:?} for price {purchase_price}: tiered {tiered}, surcharge {surcharge}");

    StampDutyBreakdown {
        band,
        tiered,
        surcharge,
        total: tiered + surcharge,
    }
}

/// Total stamp duty payable on a purchase price.
pub fn stamp_duty(purchase_price: Money) -> Money {
    breakdown(purchase_price).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert_eq, proptest};

    #[test]
    fn test_nil_band_is_surcharge_only() {
        assert_eq!(stamp_duty(dec!(100000)), dec!(3000));
        assert_eq!(band_for(dec!(100000)), StampDutyBand::Nil);
    }

    #[test]
    fn test_middle_band() {
        // 0.05 * 75000 + 0.03 * 200000 = 3750 + 6000
        assert_eq!(stamp_duty(dec!(200000)), dec!(9750));
    }

    #[test]
    fn test_upper_band_adds_flat_amount() {
        // 0.05 * 50000 + 3375 + 0.03 * 300000 = 2500 + 3375 + 9000
        let b = breakdown(dec!(300000));
        assert_eq!(b.band, StampDutyBand::Upper);
        assert_eq!(b.tiered, dec!(5875));
        assert_eq!(b.surcharge, dec!(9000));
        assert_eq!(b.total, dec!(14875));
    }

    #[test]
    fn test_band_boundaries_are_exclusive() {
        assert_eq!(band_for(dec!(125000)), StampDutyBand::Nil);
        assert_eq!(band_for(dec!(125000.01)), StampDutyBand::Middle);
        assert_eq!(band_for(dec!(250000)), StampDutyBand::Middle);
        assert_eq!(band_for(dec!(250000.01)), StampDutyBand::Upper);
    }

    #[test]
    fn test_jump_at_upper_threshold() {
        // The flat 3375 is not continuous with the middle band at 250k:
        // middle at 250000 gives 6250 tiered, upper just above gives ~3375.
        let at = breakdown(dec!(250000)).tiered;
        let above = breakdown(dec!(250001)).tiered;
        assert_eq!(at, dec!(6250));
        assert_eq!(above, dec!(3375.05));
    }

    #[test]
    fn test_zero_price() {
        assert_eq!(stamp_duty(Decimal::ZERO), Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_nil_band_is_three_percent(price in 0u32..=125_000) {
            let p = Decimal::from(price);
            prop_assert_eq!(stamp_duty(p), dec!(0.03) * p);
        }

        #[test]
        fn prop_middle_band_formula(price in 125_001u32..=250_000) {
            let p = Decimal::from(price);
            prop_assert_eq!(
                stamp_duty(p),
                dec!(0.05) * (p - dec!(125000)) + dec!(0.03) * p
            );
        }

        #[test]
        fn prop_upper_band_formula(price in 250_001u32..5_000_000) {
            let p = Decimal::from(price);
            prop_assert_eq!(
                stamp_duty(p),
                dec!(0.05) * (p - dec!(250000)) + dec!(3375) + dec!(0.03) * p
            );
        }
    }
}
