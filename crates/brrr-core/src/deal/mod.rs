pub mod calculator;
pub mod filter;
