//! # ProductStore Contract
//!
//! The single storage-service interface both front ends talk to.
//!
//! ```text
//! HTTP handler ──┐
//!                ├──► Arc<dyn ProductStore> ──► SqliteProductStore ──► products table
//! Console menu ──┘
//! ```
//!
//! ## Contract
//! - Field validation runs before any uniqueness check.
//! - Uniqueness checks run in one order everywhere: **sku, then name**.
//! - Names compare ignoring ASCII case, both for uniqueness and for the
//!   list filter. SKUs compare exactly.
//! - A duplicate detected at commit time (another writer won the race) is
//!   reported as [`StoreError::Conflict`], never as
//!   [`StoreError::Storage`].
//! - Nothing is cached; every call reads or writes durable storage.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Product, ProductDraft, ProductId, ProductPatch};

#[cfg(doc)]
use crate::error::StoreError;

/// Durable, consistent storage of [`Product`] records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Lists products by ascending id, optionally keeping only names that
    /// contain `name_filter` (ignoring ASCII case). A blank filter is no
    /// filter.
    async fn list(&self, name_filter: Option<&str>) -> StoreResult<Vec<Product>>;

    /// Fetches one product.
    async fn get(&self, id: ProductId) -> StoreResult<Product>;

    /// Validates and inserts a new product, assigning `id` and `created_at`.
    async fn create(&self, draft: ProductDraft) -> StoreResult<Product>;

    /// Replaces all four mutable fields of an existing product.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> StoreResult<Product>;

    /// Applies a partial change, then stores it exactly like [`update`].
    ///
    /// [`update`]: ProductStore::update
    async fn patch(&self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        let current = self.get(id).await?;
        let draft = patch.apply_to(&current);
        self.update(id, draft).await
    }

    /// Permanently removes a product and returns what was removed.
    async fn delete(&self, id: ProductId) -> StoreResult<Product>;

    /// Checks that the underlying storage answers.
    async fn ping(&self) -> StoreResult<()>;
}
