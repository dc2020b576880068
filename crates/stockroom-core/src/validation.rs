//! # Validation Module
//!
//! Field rules for product payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (HTTP DTO / console prompt)                        │
//! │  ├── Shape checks: missing fields, unparsable price                    │
//! │  └── Reports before the store is called                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductStore                                                 │
//! │  ├── THIS MODULE: lengths, required name, price >= 0                   │
//! │  └── Fast-path uniqueness pre-checks (sku, then name)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE indexes: the final word on duplicates                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator is a plain function; [`validate_draft`] runs them all and
//! returns the full list of violations.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_product_name, validate_sku};
//!
//! assert!(validate_product_name("Widget").is_ok());
//! assert!(validate_product_name("W").is_err());
//! assert!(validate_sku(None).is_ok());
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::ProductDraft;
use crate::{CATEGORY_MAX_LEN, NAME_MAX_LEN, NAME_MIN_LEN, SKU_MAX_LEN};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - 2 to 100 characters after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: NAME_MIN_LEN,
        });
    }
    if len > NAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: NAME_MAX_LEN,
        });
    }

    Ok(())
}

/// Validates an optional category (at most 50 characters).
pub fn validate_category(category: Option<&str>) -> ValidationResult<()> {
    validate_optional_max("category", category, CATEGORY_MAX_LEN)
}

/// Validates an optional SKU (at most 50 characters).
///
/// A missing or blank SKU is valid; it is stored as absent.
pub fn validate_sku(sku: Option<&str>) -> ValidationResult<()> {
    validate_optional_max("sku", sku, SKU_MAX_LEN)
}

fn validate_optional_max(field: &str, value: Option<&str>, max: usize) -> ValidationResult<()> {
    match value {
        Some(v) if v.trim().chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use stockroom_core::{money::Money, validation::validate_price};
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Parses user-supplied price text into [`Money`], as a validation result.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    input
        .parse::<Money>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        })
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Runs every field rule over `draft` and collects all violations.
///
/// Expects a [`ProductDraft::normalized`] draft, but tolerates surrounding
/// whitespace on its own.
pub fn validate_draft(draft: &ProductDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.collect(validate_product_name(&draft.name));
    errors.collect(validate_category(draft.category.as_deref()));
    errors.collect(validate_price(draft.price));
    errors.collect(validate_sku(draft.sku.as_deref()));
    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length_boundaries() {
        assert!(validate_product_name(&"a".repeat(2)).is_ok());
        assert!(validate_product_name(&"a".repeat(100)).is_ok());

        assert!(matches!(
            validate_product_name("a"),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
        assert!(matches!(
            validate_product_name(&"a".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_name_blank_is_required() {
        assert!(matches!(
            validate_product_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_product_name("   "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        // 100 two-byte characters
        assert!(validate_product_name(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_optional_text_limits() {
        assert!(validate_category(None).is_ok());
        assert!(validate_category(Some(&"c".repeat(50))).is_ok());
        assert!(validate_category(Some(&"c".repeat(51))).is_err());

        assert!(validate_sku(Some("")).is_ok());
        assert!(validate_sku(Some(&"s".repeat(50))).is_ok());
        assert!(validate_sku(Some(&"s".repeat(51))).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap().cents(), 999);
        let err = parse_price("9.999").unwrap_err();
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn test_validate_draft_collects_everything() {
        let draft = ProductDraft {
            name: "x".to_string(),
            category: Some("c".repeat(60)),
            price: Money::from_cents(-1),
            sku: Some("s".repeat(60)),
        };

        let errors = validate_draft(&draft).unwrap_err();
        assert_eq!(errors.len(), 4);
        for field in ["name", "category", "price", "sku"] {
            assert!(errors.has_field(field), "missing {field}");
        }
    }

    #[test]
    fn test_validate_draft_ok() {
        let draft = ProductDraft::new("Widget", Money::from_cents(999)).with_sku("W-1");
        assert!(validate_draft(&draft).is_ok());
    }
}
