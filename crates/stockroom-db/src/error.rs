//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (stockroom-core) ← UniqueViolation becomes Conflict        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError / console message                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use stockroom_core::{StoreError, UniqueField};

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting or renaming to a name that exists (any ASCII case)
    /// - Reusing a non-empty SKU
    /// - A concurrent writer committed the same value first
    ///
    /// `column` is the qualified column SQLite reports, e.g. `products.sku`.
    #[error("Unique constraint failed: {column}")]
    UniqueViolation { column: String },

    /// CHECK or NOT NULL constraint violation.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Pool closed during shutdown
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Which product column a unique violation concerns, if recognizable.
    pub fn unique_field(&self) -> Option<UniqueField> {
        match self {
            DbError::UniqueViolation { column } => {
                match column.rsplit('.').next().unwrap_or("").trim() {
                    "name" => Some(UniqueField::Name),
                    "sku" => Some(UniqueField::Sku),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (unique)  → DbError::UniqueViolation
/// sqlx::Error::Database (check)   → DbError::ConstraintViolation
/// sqlx::Error::Database (other)   → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut       → DbError::PoolExhausted
/// sqlx::Error::PoolClosed / Io    → DbError::ConnectionFailed
/// Other                           → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite: "UNIQUE constraint failed: products.name"
                if db_err.is_unique_violation() || msg.contains("UNIQUE constraint failed") {
                    let column = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { column }
                } else if db_err.is_check_violation() || msg.contains("constraint failed") {
                    DbError::ConstraintViolation(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Anything not attributable to a known unique column is a storage fault.
///
/// Call sites that know the attempted value should prefer
/// `SqliteProductStore`'s own mapping, which fills in the conflicting value.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err.unique_field() {
            Some(field) => StoreError::Conflict {
                field,
                value: String::new(),
            },
            None => StoreError::Storage(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_field_from_column() {
        let err = DbError::UniqueViolation {
            column: "products.name".to_string(),
        };
        assert_eq!(err.unique_field(), Some(UniqueField::Name));

        let err = DbError::UniqueViolation {
            column: "products.sku".to_string(),
        };
        assert_eq!(err.unique_field(), Some(UniqueField::Sku));

        let err = DbError::UniqueViolation {
            column: "unknown".to_string(),
        };
        assert_eq!(err.unique_field(), None);
    }

    #[test]
    fn test_non_unique_errors_become_storage() {
        let err: StoreError = DbError::PoolExhausted.into();
        assert!(matches!(err, StoreError::Storage(_)));
    }
}
