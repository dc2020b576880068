//! # stockroom-db: Database Layer for Stockroom
//!
//! SQLite storage for products, using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  HTTP handler / console menu                                           │
//! │       │  Arc<dyn ProductStore>                                          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌─────────────────┐  ┌──────────────────┐ │   │
//! │  │   │ SqliteProduct │  │ ProductRepo     │  │ Database         │ │   │
//! │  │   │ Store         │─►│ (raw SQL)       │─►│ (pool.rs)        │ │   │
//! │  │   │ (store.rs)    │  │                 │  │ + migrations     │ │   │
//! │  │   └───────────────┘  └─────────────────┘  └──────────────────┘ │   │
//! │  │   validation, pre-checks,                                       │   │
//! │  │   DbError → StoreError                                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL mode)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockroom_db::{Database, DbConfig, SqliteProductStore};
//!
//! let db = Database::new(DbConfig::new("./stockroom.db")).await?;
//! let store = Arc::new(SqliteProductStore::new(&db));
//! let products = store.list(None).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
pub use store::SqliteProductStore;
