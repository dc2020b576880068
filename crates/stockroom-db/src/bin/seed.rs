//! # Seed Data Generator
//!
//! Populates the database with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Products go through [`SqliteProductStore`], so every field rule and
//! uniqueness check applies. Re-running against a seeded database skips the
//! products that already exist.

use std::env;

use anyhow::{bail, Context};

use stockroom_core::{Money, ProductDraft, ProductStore, StoreError};
use stockroom_db::{Database, DbConfig, SqliteProductStore};

/// Sample catalogue: (category, SKU prefix, product names)
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "Hardware",
        "HW",
        &[
            "Claw Hammer",
            "Phillips Screwdriver",
            "Flat Screwdriver",
            "Adjustable Wrench",
            "Needle Nose Pliers",
            "Tape Measure",
            "Spirit Level",
            "Utility Knife",
        ],
    ),
    (
        "Fasteners",
        "FS",
        &[
            "Wood Screws",
            "Drywall Screws",
            "Hex Bolts",
            "Wing Nuts",
            "Flat Washers",
            "Wall Anchors",
        ],
    ),
    (
        "Electrical",
        "EL",
        &[
            "Extension Cord",
            "Light Switch",
            "Wall Outlet",
            "Junction Box",
            "Wire Nuts",
            "Electrical Tape",
        ],
    ),
    (
        "Paint",
        "PT",
        &[
            "Interior Primer",
            "Exterior Gloss",
            "Paint Roller",
            "Angled Brush",
            "Drop Cloth",
            "Masking Tape",
        ],
    ),
];

/// Size variants appended to names, with a price addon in cents
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Medium", 250), ("Large", 500)];

/// Number of distinct products the catalogue can produce.
fn catalogue_size() -> usize {
    CATEGORIES
        .iter()
        .map(|(_, _, names)| names.len() * SIZES.len())
        .sum()
}

#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    count: usize,
    db_path: String,
}

/// Parses the command line; `Ok(None)` means `--help` was printed.
fn parse_args(args: &[String]) -> anyhow::Result<Option<SeedArgs>> {
    let mut count: usize = 50;
    let mut db_path = String::from("./stockroom.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                let value = args.get(i + 1).context("--count requires a number")?;
                count = value
                    .parse()
                    .with_context(|| format!("invalid --count value: {}", value))?;
                i += 1;
            }
            "--db" | "-d" => {
                db_path = args.get(i + 1).context("--db requires a path")?.clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!(
                    "  -c, --count <N>    Number of products to generate (default: 50, max: {})",
                    catalogue_size()
                );
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom.db)");
                println!("  -h, --help         Show this help message");
                return Ok(None);
            }
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    if count > catalogue_size() {
        bail!(
            "--count {} exceeds the sample catalogue ({} products)",
            count,
            catalogue_size()
        );
    }

    Ok(Some(SeedArgs { count, db_path }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(SeedArgs { count, db_path }) = parse_args(&args)? else {
        return Ok(());
    };

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let store = SqliteProductStore::new(&db);
    println!("✓ Connected to database, migrations applied");

    let before = db.products().count().await?;

    let mut created = 0;
    let mut skipped = 0;
    let start = std::time::Instant::now();

    let drafts = CATEGORIES
        .iter()
        .enumerate()
        .flat_map(|(c, (category, prefix, names))| {
            names.iter().enumerate().flat_map(move |(n, name)| {
                SIZES.iter().enumerate().map(move |(s, size)| {
                    sample_product(category, prefix, name, *size, c * 100 + n * 10 + s)
                })
            })
        })
        .take(count);

    for draft in drafts {
        match store.create(draft).await {
            Ok(_) => created += 1,
            Err(StoreError::Conflict { .. }) => skipped += 1,
            Err(e) => {
                eprintln!("Failed to insert product: {}", e);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Created {} products in {:?}", created, elapsed);
    if skipped > 0 {
        println!("  Skipped {} that already existed", skipped);
    }
    println!(
        "  Total products: {} (was {})",
        db.products().count().await?,
        before
    );

    db.close().await;
    Ok(())
}

/// Builds one sample product with a unique name and SKU.
fn sample_product(
    category: &str,
    prefix: &str,
    name: &str,
    (size, price_addon): (&str, i64),
    seed: usize,
) -> ProductDraft {
    // $1.99 - $9.98 base, plus size addon
    let base_price = 199 + ((seed * 17) % 800) as i64;

    ProductDraft::new(
        format!("{} {}", name, size),
        Money::from_cents(base_price + price_addon),
    )
    .with_category(category)
    .with_sku(format!("{}-{:04}", prefix, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("seed")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let parsed = parse_args(&args(&[])).unwrap().unwrap();
        assert_eq!(parsed.count, 50);
        assert_eq!(parsed.db_path, "./stockroom.db");
    }

    #[test]
    fn test_count_and_db() {
        let parsed = parse_args(&args(&["-c", "10", "--db", "x.db"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            parsed,
            SeedArgs {
                count: 10,
                db_path: "x.db".to_string()
            }
        );
    }

    #[test]
    fn test_bad_count_is_reported() {
        assert!(parse_args(&args(&["--count", "lots"])).is_err());
        assert!(parse_args(&args(&["--count"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_count_above_catalogue_is_reported() {
        assert_eq!(catalogue_size(), 78);
        assert!(parse_args(&args(&["--count", "78"])).is_ok());

        let err = parse_args(&args(&["--count", "79"])).unwrap_err();
        assert!(err.to_string().contains("78"));
    }
}
