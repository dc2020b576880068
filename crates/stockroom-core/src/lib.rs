//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate holds everything about a product that can be decided without
//! touching a disk or a socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │   ┌──────────────────────┐            ┌──────────────────────┐          │
//! │   │  HTTP front end      │            │  Console front end   │          │
//! │   │  (axum, /api/v1)     │            │  (numbered menu)     │          │
//! │   └──────────┬───────────┘            └───────────┬──────────┘          │
//! │              │      Arc<dyn ProductStore>         │                     │
//! │              └──────────────────┬─────────────────┘                     │
//! │                                 ▼                                       │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │   types (Product, ProductDraft, ProductPatch)                   │   │
//! │  │   money (Money)   validation   error   store (ProductStore)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼──────────────────────────────────┐   │
//! │  │                stockroom-db (SqliteProductStore)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, drafts and patches)
//! - [`money`] - Money type with integer cents (no floating point!)
//! - [`error`] - Validation and store error types
//! - [`validation`] - Field rules, collected into a [`ValidationErrors`] list
//! - [`store`] - The [`ProductStore`] contract shared by both front ends
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{validation::validate_draft, Money, ProductDraft};
//!
//! let draft = ProductDraft::new("Widget", "9.99".parse::<Money>().unwrap())
//!     .with_sku("W-1");
//! assert!(validate_draft(&draft).is_ok());
//!
//! let too_short = ProductDraft::new("W", Money::from_cents(100));
//! let errors = validate_draft(&too_short).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{StoreError, StoreResult, UniqueField, ValidationError, ValidationErrors};
pub use money::{Money, MoneyParseError};
pub use store::ProductStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum product name length, in characters, after trimming.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum product name length, in characters, after trimming.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum category length, in characters.
pub const CATEGORY_MAX_LEN: usize = 50;

/// Maximum SKU length, in characters.
pub const SKU_MAX_LEN: usize = 50;
