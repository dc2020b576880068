//! # SQLite Product Store
//!
//! [`ProductStore`] implementation on top of [`ProductRepository`].
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create / update                                      │
//! │                                                                         │
//! │  (update only) product exists?        ── no ──► NotFound               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize + validate every field     ── bad ─► Validation([...])      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sku taken by another product?        ── yes ─► Conflict(sku)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name taken (any ASCII case)?         ── yes ─► Conflict(name)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT / UPDATE ... RETURNING                                          │
//! │       │                                                                 │
//! │       └── UNIQUE constraint failed    ───────► Conflict(field)         │
//! │           (another writer won the race)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pre-checks give deterministic error ordering. The unique indexes are
//! what actually guarantee the invariants.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use stockroom_core::validation::validate_draft;
use stockroom_core::{
    Product, ProductDraft, ProductId, ProductStore, StoreError, StoreResult, UniqueField,
};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::product::ProductRepository;

/// The product store every front end shares.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("stockroom.db")).await?;
/// let store: Arc<dyn ProductStore> = Arc::new(SqliteProductStore::new(&db));
/// ```
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    db: Database,
    products: ProductRepository,
}

impl SqliteProductStore {
    pub fn new(db: &Database) -> Self {
        SqliteProductStore {
            db: db.clone(),
            products: db.products(),
        }
    }

    /// Normalizes and validates a draft, then runs the uniqueness pre-checks.
    async fn check_draft(
        &self,
        draft: ProductDraft,
        exclude: Option<ProductId>,
    ) -> StoreResult<ProductDraft> {
        let draft = draft.normalized();
        validate_draft(&draft)?;

        if let Some(sku) = draft.sku.as_deref() {
            if self.products.sku_taken(sku, exclude).await.map_err(storage)? {
                return Err(StoreError::conflict(UniqueField::Sku, sku));
            }
        }

        if self
            .products
            .name_taken(&draft.name, exclude)
            .await
            .map_err(storage)?
        {
            return Err(StoreError::conflict(UniqueField::Name, draft.name.clone()));
        }

        Ok(draft)
    }
}

/// Maps a write failure, filling the conflicting value from the draft.
fn write_error(err: DbError, draft: &ProductDraft) -> StoreError {
    match err.unique_field() {
        Some(field) => {
            let value = match field {
                UniqueField::Name => draft.name.clone(),
                UniqueField::Sku => draft.sku.clone().unwrap_or_default(),
            };
            warn!(field = %field, value = %value, "Unique constraint caught a concurrent write");
            StoreError::conflict(field, value)
        }
        None => storage(err),
    }
}

fn storage(err: DbError) -> StoreError {
    error!(error = %err, "Storage fault");
    StoreError::from(err)
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    async fn list(&self, name_filter: Option<&str>) -> StoreResult<Vec<Product>> {
        let filter = name_filter.map(str::trim).filter(|f| !f.is_empty());
        debug!(filter = ?filter, "list");

        self.products.list(filter).await.map_err(storage)
    }

    async fn get(&self, id: ProductId) -> StoreResult<Product> {
        debug!(id, "get");

        self.products
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(StoreError::not_found(id))
    }

    async fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
        debug!(name = %draft.name, "create");

        let draft = self.check_draft(draft, None).await?;
        let product = self
            .products
            .insert(&draft, Utc::now())
            .await
            .map_err(|e| write_error(e, &draft))?;

        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> StoreResult<Product> {
        debug!(id, "update");

        if self.products.get_by_id(id).await.map_err(storage)?.is_none() {
            return Err(StoreError::not_found(id));
        }

        let draft = self.check_draft(draft, Some(id)).await?;
        let product = self
            .products
            .update(id, &draft)
            .await
            .map_err(|e| write_error(e, &draft))?
            // deleted between the existence check and the write
            .ok_or(StoreError::not_found(id))?;

        info!(id, name = %product.name, "Product updated");
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> StoreResult<Product> {
        debug!(id, "delete");

        let product = self
            .products
            .delete(id)
            .await
            .map_err(storage)?
            .ok_or(StoreError::not_found(id))?;

        info!(id, name = %product.name, "Product deleted");
        Ok(product)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.health_check().await.map_err(storage)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
