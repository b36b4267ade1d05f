use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrrrError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}
