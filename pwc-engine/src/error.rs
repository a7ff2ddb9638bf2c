//! Error types for the pathway engine

use crate::category::Category;
use crate::validation::ValidationResult;
use thiserror::Error;

/// Main error type for pathway store operations
#[derive(Error, Debug)]
pub enum Error {
    /// Candidate rejected by the validation layer (never `ValidationResult::Ok`)
    #[error("Validation failed: {0}")]
    Validation(ValidationResult),

    /// No record with this id in the category
    #[error("Pathway not found in {category}: {id}")]
    NotFound { category: Category, id: String },

    /// Reorder index outside `0..len`
    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Category name did not match any known category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Snapshot flush failed
    #[error("Storage error: {0}")]
    Storage(#[from] pwc_common::Error),
}

/// Convenience Result type using the engine Error
pub type Result<T> = std::result::Result<T, Error>;
