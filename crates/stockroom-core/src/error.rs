//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── ValidationError   - One field rule violated                       │
//! │  ├── ValidationErrors  - Every violation found in one payload          │
//! │  └── StoreError        - What a ProductStore operation returns         │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError           - Database operation failures                   │
//! │                                                                         │
//! │  server errors (in app)                                                │
//! │  └── ApiError          - What HTTP clients see (status + JSON)         │
//! │                                                                         │
//! │  Flow: ValidationErrors ─┐                                             │
//! │        DbError ──────────┴─► StoreError ─► ApiError / console text     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value could not be parsed (e.g. a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Errors (list)
// =============================================================================

/// All violations found while validating one payload.
///
/// Validators append to this list instead of stopping at the first problem,
/// so a client fixing a form sees every broken field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty list.
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    /// Appends a violation.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Records the error side of `result`, if any.
    pub fn collect(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.push(e);
        }
    }

    /// Appends every violation from `other`.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns true if any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Store Error
// =============================================================================

/// Column protected by a uniqueness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Name,
    Sku,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Name => "name",
            UniqueField::Sku => "sku",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a failed [`ProductStore`](crate::ProductStore) operation.
///
/// ## Caller Handling
/// ```text
/// Validation ──► fix the input, do not retry as-is
/// NotFound   ──► id does not exist (or was just deleted)
/// Conflict   ──► name/sku taken, including races lost at commit time
/// Storage    ──► I/O or engine fault, report as a server error
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// One or more field rules were violated.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No product has this id.
    #[error("Product not found: {id}")]
    NotFound { id: ProductId },

    /// Another product already holds this name or SKU.
    #[error("Duplicate {field}: '{value}' already exists")]
    Conflict { field: UniqueField, value: String },

    /// Underlying durable-storage fault.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found(id: ProductId) -> Self {
        StoreError::NotFound { id }
    }

    pub fn conflict(field: UniqueField, value: impl Into<String>) -> Self {
        StoreError::Conflict {
            field,
            value: value.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(error: ValidationError) -> Self {
        StoreError::Validation(error.into())
    }
}

/// Convenience type alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
