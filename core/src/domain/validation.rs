//! User-input validation failures. These are blocking: the offending
//! command is rejected and no state is mutated.

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Pet name cannot be empty")]
    EmptyPetName,
    #[error("Procedure name cannot be empty")]
    EmptyProcedureName,
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
    #[error("Interval must be at least 1")]
    NonPositiveInterval,
    #[error("Upcoming threshold cannot be negative")]
    NegativeThreshold,
}
