use serde::{Deserialize, Serialize};

use super::calculator::DealRecord;
use crate::types::{Money, Percent};

/// Investment criteria a deal must satisfy to be kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealThresholds {
    /// Minimum cash-on-cash return, in percent
    pub min_roi: Percent,
    /// Minimum gross yield, in percent
    pub min_yield: Percent,
    /// Maximum cash allowed to remain in the deal after refinancing
    pub max_cash_left_in: Money,
}

impl DealThresholds {
    /// True when a record meets every threshold. Bounds are inclusive.
    pub fn accepts(&self, record: &DealRecord) -> bool {
        record.roi_percent >= self.min_roi
            && record.yield_percent >= self.min_yield
            && record.cash_left_in <= self.max_cash_left_in
    }
}

/// Keep the records that meet `thresholds`, preserving their order.
///
/// Never fails; no matches (or no records) gives an empty vector.
pub fn filter(records: &[DealRecord], thresholds: &DealThresholds) -> Vec<DealRecord> {
    let kept: Vec<DealRecord> = records
        .iter()
        .filter(|r| thresholds.accepts(r))
        .cloned()
        .collect();

    log::debug!("Filter kept {} of {} deals", kept.len(), records.len());
    kept
}
