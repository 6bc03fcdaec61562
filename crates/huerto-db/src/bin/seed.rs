//! # Catalog Seeder
//!
//! Writes the storefront's built-in products into a database file.
//!
//! ## Usage
//! ```bash
//! # Seed ./huerto_dev.db (default)
//! cargo run -p huerto-db --bin seed
//!
//! # Specify database path
//! cargo run -p huerto-db --bin seed -- --db ./data/huerto.db
//!
//! # Overwrite existing rows with the built-in values
//! cargo run -p huerto-db --bin seed -- --force
//! ```

use std::env;

use huerto_core::catalog::builtin_products;
use huerto_core::Catalog;
use huerto_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./huerto_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Huerto Hogar Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./huerto_dev.db)");
                println!("  -f, --force        Overwrite products that already exist");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("Huerto Hogar Catalog Seeder");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.products();
    let written = if force {
        repo.upsert_many(&builtin_products()).await?
    } else {
        repo.seed_builtin().await?
    };

    if written == 0 {
        println!("⚠ Database already has {} products", repo.count().await?);
        println!("  Use --force to overwrite them with the built-in values.");
    } else {
        println!("✓ Wrote {} products", written);
    }

    let catalog = repo.load_catalog().await?;
    println!();
    for category in catalog.categories() {
        let count = catalog.search("", Some(&category))?.len();
        println!("  {:<10} {} products", category, count);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
