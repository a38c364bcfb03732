//! # Seed Data Generator
//!
//! Populates a development database with a demo shop: one account, a
//! small catalog, a few sales and expenses. Runs through the real
//! services, so everything the services enforce (validation, stock
//! decrements, transactional sale commits) holds for seeded data too.
//!
//! ## Usage
//! ```bash
//! # Default database (./duka_dev.db)
//! cargo run -p duka-shop --bin seed
//!
//! # Specify database path
//! cargo run -p duka-shop --bin seed -- --db ./data/duka.db
//! ```
//!
//! Demo credentials: `demo@duka.shop` / `duka-demo-2024`

use std::env;

use tracing_subscriber::EnvFilter;

use duka_core::{Currency, Language, NewExpense, NewProduct};
use duka_db::{Database, DbConfig};
use duka_shop::{
    AuthService, CatalogService, ChangeFeed, ExpenseService, LedgerService, SessionState,
};

const DEMO_EMAIL: &str = "demo@duka.shop";
const DEMO_PASSWORD: &str = "duka-demo-2024";

/// (name, category, subcategory, stock, purchase cents, sale cents)
const CATALOG: &[(&str, &str, Option<&str>, i64, i64, i64)] = &[
    ("Savon de Marseille", "Hygiene", Some("Soap"), 40, 100, 250),
    ("Riz 5kg", "Food", Some("Staples"), 25, 1100, 1500),
    ("Huile de palme 1L", "Food", Some("Cooking"), 30, 350, 500),
    ("Sucre 1kg", "Food", Some("Staples"), 50, 180, 260),
    ("Allumettes", "Household", None, 120, 10, 25),
    ("Carte prépayée 1000FC", "Telecom", None, 60, 900, 1000),
    ("Savon liquide 500ml", "Hygiene", Some("Soap"), 15, 220, 400),
    ("Farine de maïs 2kg", "Food", Some("Staples"), 35, 420, 600),
];

/// (product index into CATALOG, quantity)
const SALES: &[(usize, i64)] = &[(0, 3), (1, 1), (3, 5), (0, 2), (4, 10), (5, 4), (2, 2)];

/// (amount cents, description, category)
const EXPENSES: &[(i64, &str, Option<&str>)] = &[
    (15_000, "Loyer du mois", Some("Rent")),
    (2_500, "Transport marchandises", Some("Logistics")),
    (800, "Crédit téléphone", None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./duka_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Duka Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./duka_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Duka Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.users().find_by_email(DEMO_EMAIL).await?.is_some() {
        println!("⚠ Demo account already exists");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let session = SessionState::new();
    let feed = ChangeFeed::new();
    let auth = AuthService::new(db.clone(), session.clone(), feed.clone());

    let profile = auth
        .sign_up(DEMO_EMAIL, DEMO_PASSWORD, Language::Fr, Currency::Cdf)
        .await?;
    println!("✓ Created demo account {} ({})", profile.email, profile.user_id);

    let owner = profile.user_id.clone();
    let catalog = CatalogService::new(db.clone(), owner.clone(), feed.clone());
    let ledger = LedgerService::new(db.clone(), owner.clone(), feed.clone());
    let expenses = ExpenseService::new(db.clone(), owner.clone(), feed);

    println!();
    println!("Seeding catalog...");
    let mut products = Vec::with_capacity(CATALOG.len());
    for (name, category, subcategory, stock, purchase, sale) in CATALOG {
        let product = catalog
            .create(NewProduct {
                name: (*name).to_string(),
                category: (*category).to_string(),
                subcategory: subcategory.map(str::to_string),
                initial_stock: *stock,
                purchase_price_cents: *purchase,
                sale_price_cents: *sale,
            })
            .await?;
        products.push(product);
    }
    println!("✓ {} products", products.len());

    println!("Recording sales...");
    for (index, quantity) in SALES {
        ledger.record_sale(&products[*index].id, *quantity).await?;
    }
    println!("✓ {} sales", SALES.len());

    println!("Recording expenses...");
    for (amount, description, category) in EXPENSES {
        expenses
            .add(NewExpense {
                amount_cents: *amount,
                description: (*description).to_string(),
                category: category.map(str::to_string),
                date: None,
            })
            .await?;
    }
    println!("✓ {} expenses", EXPENSES.len());

    println!();
    println!("✓ Seed complete!");
    println!("  Sign in with {DEMO_EMAIL} / {DEMO_PASSWORD}");

    Ok(())
}
