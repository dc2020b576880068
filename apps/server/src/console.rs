//! # Console Front End
//!
//! Interactive, line-based menu over any async reader/writer pair.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ 1 - Create product           │──► prompts ──► store.create
//! │ 2 - List products            │──► table   ◄── store.list
//! │ 3 - Update product (by id)   │──► prompts ──► store.patch  (blank = keep)
//! │ 4 - Delete product (by id)   │──► store.delete
//! │ 0 - Exit                     │──► return   (EOF does the same)
//! └──────────────────────────────┘
//! ```
//!
//! Store errors are printed and the menu continues; only I/O errors on the
//! console streams end [`Console::run`] early.

use std::sync::Arc;

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use stockroom_core::validation::parse_price;
use stockroom_core::{Product, ProductDraft, ProductId, ProductPatch, ProductStore, StoreError};

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The console menu bound to a store and a pair of streams.
pub struct Console<R, W> {
    store: Arc<dyn ProductStore>,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(store: Arc<dyn ProductStore>, input: R, output: W) -> Self {
        Console {
            store,
            input,
            output,
        }
    }

    /// Runs the menu until `0` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        self.write_line("=============================================").await?;
        self.write_line("              Stockroom Inventory            ").await?;
        self.write_line("=============================================").await?;

        loop {
            self.write_line("").await?;
            self.write_line("Choose an option:").await?;
            self.write_line("1 - Create product").await?;
            self.write_line("2 - List products").await?;
            self.write_line("3 - Update product (by id)").await?;
            self.write_line("4 - Delete product (by id)").await?;
            self.write_line("0 - Exit").await?;

            let Some(choice) = self.prompt("\nOption: ").await? else {
                break;
            };
            debug!(choice = %choice, "Console menu choice");

            let flow = match choice.as_str() {
                "0" => Flow::Exit,
                "1" => self.create().await?,
                "2" => self.list().await?,
                "3" => self.update().await?,
                "4" => self.delete().await?,
                _ => {
                    self.write_line("Invalid option.").await?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.write_line("Bye.").await?;
        self.output.flush().await
    }

    async fn create(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("\nProduct name: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.prompt("Category (optional): ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt("Price: ").await? else {
            return Ok(Flow::Exit);
        };
        let price = match parse_price(&price) {
            Ok(price) => price,
            Err(e) => {
                self.write_line(&format!("Invalid price: {}", e)).await?;
                return Ok(Flow::Continue);
            }
        };
        let Some(sku) = self.prompt("SKU (optional): ").await? else {
            return Ok(Flow::Exit);
        };

        let draft = ProductDraft {
            name,
            category: Some(category),
            price,
            sku: Some(sku),
        };

        match self.store.create(draft).await {
            Ok(product) => {
                self.write_line(&format!(
                    "Product '{}' created. Id: {}",
                    product.name, product.id
                ))
                .await?
            }
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn list(&mut self) -> io::Result<Flow> {
        match self.store.list(None).await {
            Ok(products) if products.is_empty() => self.write_line("No products found.").await?,
            Ok(products) => self.write_table(&products).await?,
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn update(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_id("\nId of the product to update: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(id) = id else {
            return Ok(Flow::Continue);
        };

        let current = match self.store.get(id).await {
            Ok(product) => product,
            Err(e) => {
                self.report(&e).await?;
                return Ok(Flow::Continue);
            }
        };

        self.write_line(&format!(
            "Updating id {}. Leave blank to keep the current value.",
            current.id
        ))
        .await?;

        let mut patch = ProductPatch::default();

        let Some(name) = self.prompt(&format!("Name [{}]: ", current.name)).await? else {
            return Ok(Flow::Exit);
        };
        if !name.is_empty() {
            patch.name = Some(name);
        }

        let label = format!("Category [{}]: ", current.category.as_deref().unwrap_or(""));
        let Some(category) = self.prompt(&label).await? else {
            return Ok(Flow::Exit);
        };
        if !category.is_empty() {
            patch.category = Some(Some(category));
        }

        let Some(price) = self.prompt(&format!("Price [{}]: ", current.price)).await? else {
            return Ok(Flow::Exit);
        };
        if !price.is_empty() {
            match parse_price(&price) {
                Ok(price) => patch.price = Some(price),
                Err(e) => {
                    self.write_line(&format!("Invalid price: {}", e)).await?;
                    return Ok(Flow::Continue);
                }
            }
        }

        let label = format!("SKU [{}]: ", current.sku.as_deref().unwrap_or(""));
        let Some(sku) = self.prompt(&label).await? else {
            return Ok(Flow::Exit);
        };
        if !sku.is_empty() {
            patch.sku = Some(Some(sku));
        }

        match self.store.patch(id, patch).await {
            Ok(_) => self.write_line("Product updated.").await?,
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt_id("\nId of the product to delete: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(id) = id else {
            return Ok(Flow::Continue);
        };

        match self.store.delete(id).await {
            Ok(product) => {
                self.write_line(&format!("Product '{}' deleted.", product.name))
                    .await?
            }
            Err(e) => self.report(&e).await?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    async fn write_table(&mut self, products: &[Product]) -> io::Result<()> {
        self.write_line(&format!("\n{}", RULE)).await?;
        self.write_line(&format!(
            "{:>4} | {:<28} | {:<16} | {:>10} | {}",
            "Id", "Name", "Category", "Price", "SKU"
        ))
        .await?;
        self.write_line(RULE).await?;

        for p in products {
            let line = format!(
                "{:>4} | {:<28} | {:<16} | {:>10} | {}",
                p.id,
                p.name,
                p.category.as_deref().unwrap_or(""),
                p.price,
                p.sku.as_deref().unwrap_or("")
            );
            self.write_line(&line).await?;
        }

        self.write_line(RULE).await
    }

    async fn report(&mut self, err: &StoreError) -> io::Result<()> {
        let message = match err {
            StoreError::Validation(errors) => errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            StoreError::NotFound { .. } => "Product not found.".to_string(),
            StoreError::Conflict { .. } => err.to_string(),
            StoreError::Storage(_) => "Storage error, please try again.".to_string(),
        };
        self.write_line(&message).await
    }

    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    /// Prints `label` and reads one trimmed line; `None` at end of input.
    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads an id. Outer `None` is end of input, inner `None` an invalid id
    /// that has already been reported.
    async fn prompt_id(&mut self, label: &str) -> io::Result<Option<Option<ProductId>>> {
        let Some(text) = self.prompt(label).await? else {
            return Ok(None);
        };
        match text.parse::<ProductId>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                self.write_line("Invalid id.").await?;
                Ok(Some(None))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Money;
    use stockroom_db::{Database, DbConfig, SqliteProductStore};

    async fn store() -> Arc<dyn ProductStore> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Arc::new(SqliteProductStore::new(&db))
    }

    /// Runs the console over `script` and returns everything it printed.
    async fn run(store: &Arc<dyn ProductStore>, script: &str) -> String {
        let mut output = Vec::new();
        {
            let mut console = Console::new(
                Arc::clone(store),
                io::BufReader::new(script.as_bytes()),
                &mut output,
            );
            console.run().await.unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = store().await;
        let out = run(&store, "1\nWidget\nTools\n9.99\nW-1\n2\n0\n").await;

        assert!(out.contains("Product 'Widget' created. Id: 1"));
        assert!(out.contains("Widget"));
        assert!(out.contains("9.99"));
        assert!(out.ends_with("Bye.\n"));

        let products = store.list(None).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category.as_deref(), Some("Tools"));
    }

    #[tokio::test]
    async fn test_blank_optionals_are_absent() {
        let store = store().await;
        run(&store, "1\nWidget\n\n1.50\n\n0\n").await;

        let p = &store.list(None).await.unwrap()[0];
        assert_eq!(p.category, None);
        assert_eq!(p.sku, None);
        assert_eq!(p.price, Money::from_cents(150));
    }

    #[tokio::test]
    async fn test_invalid_price_is_reported() {
        let store = store().await;
        let out = run(&store, "1\nWidget\n\nabc\n0\n").await;

        assert!(out.contains("Invalid price"));
        assert!(store.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_reported() {
        let store = store().await;
        store
            .create(ProductDraft::new("Widget", Money::zero()))
            .await
            .unwrap();

        let out = run(&store, "1\nWIDGET\n\n1\n\n0\n").await;
        assert!(out.contains("Duplicate name"));
    }

    #[tokio::test]
    async fn test_update_blank_keeps_values() {
        let store = store().await;
        let p = store
            .create(
                ProductDraft::new("Widget", Money::from_cents(999))
                    .with_category("Tools")
                    .with_sku("W-1"),
            )
            .await
            .unwrap();

        let out = run(&store, &format!("3\n{}\n\n\n12.50\n\n0\n", p.id)).await;
        assert!(out.contains("Product updated."));

        let updated = store.get(p.id).await.unwrap();
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.category.as_deref(), Some("Tools"));
        assert_eq!(updated.sku.as_deref(), Some("W-1"));
        assert_eq!(updated.price, Money::from_cents(1250));
    }

    #[tokio::test]
    async fn test_update_to_taken_name_conflicts() {
        let store = store().await;
        store
            .create(ProductDraft::new("Widget", Money::zero()))
            .await
            .unwrap();
        let gadget = store
            .create(ProductDraft::new("Gadget", Money::zero()))
            .await
            .unwrap();

        let out = run(&store, &format!("3\n{}\nwidget\n\n\n\n0\n", gadget.id)).await;
        assert!(out.contains("Duplicate name"));
        assert_eq!(store.get(gadget.id).await.unwrap().name, "Gadget");
    }

    #[tokio::test]
    async fn test_delete_and_missing_ids() {
        let store = store().await;
        let p = store
            .create(ProductDraft::new("Widget", Money::zero()))
            .await
            .unwrap();

        let out = run(&store, &format!("4\n{}\n4\n{}\n4\nabc\n3\n77\n0\n", p.id, p.id)).await;
        assert!(out.contains("Product 'Widget' deleted."));
        assert!(out.contains("Product not found."));
        assert!(out.contains("Invalid id."));
        assert!(store.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_and_unknown_option() {
        let store = store().await;
        let out = run(&store, "2\n9\n0\n").await;

        assert!(out.contains("No products found."));
        assert!(out.contains("Invalid option."));
    }

    #[tokio::test]
    async fn test_eof_exits_like_zero() {
        let store = store().await;
        let out = run(&store, "2\n").await;
        assert!(out.ends_with("Bye.\n"));

        // EOF in the middle of a prompt sequence
        let out = run(&store, "1\nWidget\n").await;
        assert!(out.ends_with("Bye.\n"));
        assert!(store.list(None).await.unwrap().is_empty());
    }
}
