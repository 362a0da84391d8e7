use thiserror::Error;

/// Input problems caught at the CLI boundary. The allocator receives only
/// pre-validated values and does not re-check them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be a non-negative number")]
    InvalidAmount,
    #[error("an end date (YYYY-MM-DD) is required")]
    MissingEndDate,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("category must not be empty")]
    EmptyCategory,
}
