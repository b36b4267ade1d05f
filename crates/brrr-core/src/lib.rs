pub mod deal;
pub mod error;
pub mod stamp_duty;
pub mod types;

#[cfg(feature = "portfolio")]
pub mod portfolio;

pub use deal::calculator::{
    analyse_deal, compute, validate_deal_input, DealInput, DealRecord, FeeSchedule, MAX_AMOUNT,
    STANDARD_FEES,
};
pub use deal::filter::{filter, DealThresholds};
pub use error::BrrrError;
pub use types::*;

/// Standard result type for all deal operations
pub type BrrrResult<T> = Result<T, BrrrError>;
