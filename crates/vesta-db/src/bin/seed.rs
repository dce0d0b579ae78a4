//! # Seed Data Generator
//!
//! Populates a development database with a demo wholesale setup: one seller
//! with a configured program and catalog, two approved buyers, and one
//! buyer without access (for exercising the authorization path).
//!
//! ## Usage
//! ```bash
//! # Seed the default database path
//! cargo run -p vesta-db --bin seed
//!
//! # Specify database path
//! cargo run -p vesta-db --bin seed -- --db ./data/wholesale.db
//! ```

use std::env;

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use vesta_core::{Buyer, GrantStatus, Product, SellerProgram, WholesaleAccessGrant};
use vesta_db::{Database, DbConfig};

/// Demo catalog: (name, sku, price minor units, moq).
const CATALOG: &[(&str, &str, i64, Option<i64>)] = &[
    ("Stoneware Mug 12oz", "MUG-12", 1250, Some(24)),
    ("Stoneware Mug 16oz", "MUG-16", 1450, Some(24)),
    ("Dinner Plate 10in", "PLT-10", 2200, Some(12)),
    ("Side Plate 7in", "PLT-07", 1600, Some(12)),
    ("Serving Bowl Large", "BWL-LG", 3800, Some(6)),
    ("Espresso Cup Set", "ESP-SET", 4200, None),
    ("Butter Dish", "BTR-01", 2900, None),
    ("Salt Cellar", "SLT-01", 1100, None),
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path = parse_db_path().unwrap_or_else(|| "./data/wholesale.db".to_string());
    info!(path = %db_path, "Seeding wholesale database");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let now = Utc::now();

    let seller_id = Uuid::new_v4().to_string();

    // Seller program: 30% deposit, $250 minimum, two offered terms.
    db.programs()
        .upsert(&SellerProgram {
            seller_id: seller_id.clone(),
            deposit_percentage: 30,
            minimum_order_value_minor_units: Some(25_000),
            allowed_payment_terms: vec!["Net 30".to_string(), "Immediate".to_string()],
            currency: "USD".to_string(),
        })
        .await?;

    for (name, sku, price, moq) in CATALOG {
        db.products()
            .insert(&Product {
                id: Uuid::new_v4().to_string(),
                seller_id: seller_id.clone(),
                name: (*name).to_string(),
                sku: Some((*sku).to_string()),
                image_url: None,
                price_minor_units: *price,
                moq: *moq,
                currency: "USD".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;
    }
    info!(seller_id = %seller_id, products = CATALOG.len(), "Catalog seeded");

    // Two approved buyers, one outsider.
    let buyers = [
        ("retail-north@example.com", "Rosa", "Martins", true),
        ("coastal-goods@example.com", "Theo", "Lindqvist", true),
        ("no-access@example.com", "Sam", "Okafor", false),
    ];

    for (email, first, last, approved) in buyers {
        let buyer_id = Uuid::new_v4().to_string();
        db.buyers()
            .insert(&Buyer {
                id: buyer_id.clone(),
                email: email.to_string(),
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                created_at: now,
            })
            .await?;

        if approved {
            db.grants()
                .insert(&WholesaleAccessGrant {
                    id: Uuid::new_v4().to_string(),
                    buyer_id: buyer_id.clone(),
                    seller_id: seller_id.clone(),
                    status: GrantStatus::Active,
                    pricing_tier: Some("standard".to_string()),
                    granted_at: now,
                    revoked_at: None,
                })
                .await?;
        }
        info!(buyer = email, approved, "Buyer seeded");
    }

    info!("Seed complete");
    Ok(())
}

/// Parses `--db <path>` from the command line.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
