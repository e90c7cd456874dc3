use thiserror::Error;

/// Error types for the domain core.
///
/// Every invariant the schema cannot express on its own is enforced here and
/// surfaced as one of these variants instead of being swallowed.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An illegal lifecycle move was attempted.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Registration was attempted after every seat was taken.
    #[error("Activity is full (capacity {capacity})")]
    CapacityExceeded { capacity: i32 },

    /// A second participation for the same (student, activity) pair.
    #[error("Student is already registered for this activity")]
    DuplicateParticipation,

    /// Missing or malformed field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Activity category outside the fixed set.
    #[error("Unknown activity category: {0}")]
    UnknownCategory(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Type alias for Result with DomainError
pub type Result<T> = std::result::Result<T, DomainError>;
