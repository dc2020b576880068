//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Case Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Names Are Compared                               │
//! │                                                                         │
//! │  products.name is declared COLLATE NOCASE                              │
//! │       │                                                                 │
//! │       ├── WHERE name = ?      → "WIDGET" matches "widget"              │
//! │       ├── UNIQUE index        → "Widget" and "WIDGET" cannot coexist   │
//! │       └── list filter         → instr(lower(name), lower(?)) > 0       │
//! │                                                                         │
//! │  products.sku uses BINARY collation: "w-1" and "W-1" are distinct.     │
//! │  NULL skus never collide with each other.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Insert, update and delete use `RETURNING`, so every write hands back the
//! row exactly as stored in a single statement.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{Money, Product, ProductDraft, ProductId};

const PRODUCT_COLUMNS: &str = "id, name, category, price_cents, sku, created_at";

/// A `products` row as SQLite returns it.
#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: Option<String>,
    price_cents: i64,
    sku: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            category: row.category,
            price: Money::from_cents(row.price_cents),
            sku: row.sku,
            created_at: row.created_at,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let matches = repo.list(Some("widg")).await?;
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id.
    ///
    /// ## Arguments
    /// * `name_filter` - Substring to look for in names, ignoring ASCII case.
    ///   `None` returns every product.
    pub async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<Product>> {
        debug!(filter = ?name_filter, "Listing products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE ?1 IS NULL OR instr(lower(name), lower(?1)) > 0 \
             ORDER BY id"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(name_filter)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "List returned products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Whether another product already holds `sku` (exact match).
    ///
    /// `exclude` skips the product being updated so it never collides with
    /// itself.
    pub async fn sku_taken(&self, sku: &str, exclude: Option<ProductId>) -> DbResult<bool> {
        let taken: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products WHERE sku = ?1 AND (?2 IS NULL OR id <> ?2))",
        )
        .bind(sku)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken != 0)
    }

    /// Whether another product already holds `name`, ignoring ASCII case.
    pub async fn name_taken(&self, name: &str, exclude: Option<ProductId>) -> DbResult<bool> {
        let taken: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products WHERE name = ?1 AND (?2 IS NULL OR id <> ?2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken != 0)
    }

    /// Inserts a new product and returns it with its assigned id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored row
    /// * `Err(DbError::UniqueViolation)` - Name or SKU already exists
    pub async fn insert(&self, draft: &ProductDraft, created_at: DateTime<Utc>) -> DbResult<Product> {
        debug!(name = %draft.name, "Inserting product");

        let sql = format!(
            "INSERT INTO products (name, category, price_cents, sku, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(draft.price.cents())
            .bind(&draft.sku)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    /// Replaces the mutable fields of a product.
    ///
    /// `id` and `created_at` are never touched.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - The row after the update
    /// * `Ok(None)` - No product has this id
    pub async fn update(&self, id: ProductId, draft: &ProductDraft) -> DbResult<Option<Product>> {
        debug!(id = %id, "Updating product");

        let sql = format!(
            "UPDATE products SET \
                name = ?2, \
                category = ?3, \
                price_cents = ?4, \
                sku = ?5 \
             WHERE id = ?1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.category)
            .bind(draft.price.cents())
            .bind(&draft.sku)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Hard-deletes a product and returns the removed row.
    ///
    /// Ids are AUTOINCREMENT, so a deleted id is never reissued.
    pub async fn delete(&self, id: ProductId) -> DbResult<Option<Product>> {
        debug!(id = %id, "Deleting product");

        let sql = format!("DELETE FROM products WHERE id = ?1 RETURNING {PRODUCT_COLUMNS}");

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    fn draft(name: &str, sku: Option<&str>) -> ProductDraft {
        let mut d = ProductDraft::new(name, Money::from_cents(250));
        d.sku = sku.map(str::to_string);
        d
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = repo().await;
        let a = repo.insert(&draft("Alpha", None), Utc::now()).await.unwrap();
        let b = repo.insert(&draft("Beta", None), Utc::now()).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.price, Money::from_cents(250));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let repo = repo().await;
        let a = repo.insert(&draft("Alpha", None), Utc::now()).await.unwrap();
        repo.delete(a.id).await.unwrap();

        let b = repo.insert(&draft("Beta", None), Utc::now()).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_unique_name_ignores_case() {
        let repo = repo().await;
        repo.insert(&draft("Widget", None), Utc::now()).await.unwrap();

        assert!(repo.name_taken("WIDGET", None).await.unwrap());
        let err = repo
            .insert(&draft("wIdGeT", None), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_sku_is_case_sensitive_and_nulls_repeat() {
        let repo = repo().await;
        repo.insert(&draft("One", Some("W-1")), Utc::now()).await.unwrap();
        repo.insert(&draft("Two", Some("w-1")), Utc::now()).await.unwrap();
        repo.insert(&draft("Three", None), Utc::now()).await.unwrap();
        repo.insert(&draft("Four", None), Utc::now()).await.unwrap();

        assert!(repo.sku_taken("W-1", None).await.unwrap());
        assert!(!repo.sku_taken("W-2", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_taken_checks_exclude_self() {
        let repo = repo().await;
        let p = repo
            .insert(&draft("Widget", Some("W-1")), Utc::now())
            .await
            .unwrap();

        assert!(!repo.name_taken("widget", Some(p.id)).await.unwrap());
        assert!(!repo.sku_taken("W-1", Some(p.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filter() {
        let repo = repo().await;
        repo.insert(&draft("Blue Widget", None), Utc::now()).await.unwrap();
        repo.insert(&draft("Gadget", None), Utc::now()).await.unwrap();
        repo.insert(&draft("WIDGET Pro", None), Utc::now()).await.unwrap();

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let names: Vec<_> = repo
            .list(Some("widg"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Blue Widget", "WIDGET Pro"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_return_none() {
        let repo = repo().await;
        assert!(repo.update(99, &draft("Nope", None)).await.unwrap().is_none());
        assert!(repo.delete(99).await.unwrap().is_none());
        assert!(repo.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let repo = repo().await;
        let p = repo.insert(&draft("Widget", None), Utc::now()).await.unwrap();

        let updated = repo
            .update(p.id, &draft("Widget 2", Some("W-2")))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, p.id);
        assert_eq!(updated.created_at, p.created_at);
        assert_eq!(updated.sku.as_deref(), Some("W-2"));
    }
}
