pub mod deal;
pub mod portfolio;
