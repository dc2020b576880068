//! # Domain Types
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductDraft   │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  name?          │       │
//! │  │  name           │   │  category?      │   │  category??     │       │
//! │  │  category?      │   │  price          │   │  price?         │       │
//! │  │  price (Money)  │   │  sku?           │   │  sku??          │       │
//! │  │  sku?           │   │                 │   │                 │       │
//! │  │  created_at     │   │ Create / Update │   │ keep-if-absent  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `id` and `created_at` are assigned by the store and never change; the
//! four mutable fields travel in a [`ProductDraft`] (full replacement) or a
//! [`ProductPatch`] (per-field keep/set/clear).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// System-assigned product identifier.
pub type ProductId = i64;

// =============================================================================
// Product
// =============================================================================

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, never reused, immutable.
    pub id: ProductId,

    /// Display name, unique ignoring ASCII case.
    pub name: String,

    /// Optional grouping label.
    pub category: Option<String>,

    /// Unit price, never negative.
    pub price: Money,

    /// Stock Keeping Unit, unique when present.
    pub sku: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product Draft
// =============================================================================

/// The mutable fields of a product, as supplied to Create and Update.
///
/// Update uses full-replacement semantics: a `None` category or sku clears
/// the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub category: Option<String>,
    pub price: Money,
    pub sku: Option<String>,
}

impl ProductDraft {
    /// Creates a draft with no category and no SKU.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        ProductDraft {
            name: name.into(),
            category: None,
            price,
            sku: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Trims every text field and turns blank optionals into `None`.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, ProductDraft};
    ///
    /// let draft = ProductDraft::new("  Widget ", Money::zero())
    ///     .with_category("")
    ///     .with_sku("  W-1 ")
    ///     .normalized();
    /// assert_eq!(draft.name, "Widget");
    /// assert_eq!(draft.category, None);
    /// assert_eq!(draft.sku.as_deref(), Some("W-1"));
    /// ```
    pub fn normalized(self) -> Self {
        ProductDraft {
            name: self.name.trim().to_string(),
            category: normalize_optional(self.category),
            price: self.price,
            sku: normalize_optional(self.sku),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        ProductDraft {
            name: p.name.clone(),
            category: p.category.clone(),
            price: p.price,
            sku: p.sku.clone(),
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial changes for the Patch operation.
///
/// ## Field Semantics
/// ```text
/// name / price          None → keep,  Some(v) → set
/// category / sku        None → keep,  Some(None) → clear,  Some(Some(v)) → set
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<Option<String>>,
    pub price: Option<Money>,
    pub sku: Option<Option<String>>,
}

impl ProductPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none() && self.sku.is_none()
    }

    /// Merges the patch over `current`, producing the full replacement draft.
    pub fn apply_to(&self, current: &Product) -> ProductDraft {
        let mut draft = ProductDraft::from(current);
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(category) = &self.category {
            draft.category = category.clone();
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(sku) = &self.sku {
            draft.sku = sku.clone();
        }
        draft
    }
}

/// Trims `value`; blank or whitespace-only becomes `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
