//! # Repository Module
//!
//! Raw SQL access for Stockroom.
//!
//! ```text
//! SqliteProductStore
//!      │  db.products().get_by_id(7)
//!      ▼
//! ProductRepository
//! ├── list(filter)
//! ├── get_by_id(id)
//! ├── sku_taken(sku, exclude) / name_taken(name, exclude)
//! ├── insert(draft, created_at)
//! ├── update(id, draft)
//! └── delete(id)
//!      │
//!      ▼
//! SQLite `products` table
//! ```
//!
//! Repositories know nothing about validation; they run exactly the SQL
//! they are asked to and report what SQLite says.

pub mod product;
