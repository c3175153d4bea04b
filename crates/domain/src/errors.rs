//! Business rule violations, separate from infrastructure errors.

use thiserror::Error;

/// Errors a caller can act on: bad input, conflicts, missing rows.
/// Infrastructure failures (disk, SQL syntax) travel as `anyhow` errors
/// in the storage layer instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation: empty fields, negative or non-numeric amounts
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A product with this SKU already exists
    #[error("Product with SKU '{0}' already exists")]
    DuplicateSku(String),

    /// Checkout invoked on a bill with no lines
    #[error("The bill is empty")]
    EmptyBill,

    /// A bill line asks for more units than are in stock
    #[error("Not enough stock for '{name}'. Required: {requested}, Available: {available}")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: i64,
    },

    /// Operation targeted a row that does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// True for errors caused by malformed caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_) | DomainError::EmptyBill)
    }

    /// True for errors where current store state rejects the operation.
    pub fn is_conflict_error(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateSku(_) | DomainError::InsufficientStock { .. }
        )
    }

    pub fn is_not_found_error(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}
