//! # Seed Data Generator
//!
//! Fills a drink catalog with sample drinks for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 drinks (default)
//! cargo run -p coffee-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p coffee-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p coffee-db --bin seed -- --db ./data/coffee_shop.db
//! ```
//!
//! Each generated drink gets a base name plus a size, a valid `D.CC` price,
//! two to four ingredients and, for every other drink, an availability
//! window around today.

use chrono::{Duration, Utc};
use coffee_core::{Drink, DrinkSearchSpec};
use coffee_db::{Database, DbConfig};
use std::env;

/// Base drinks and the ingredients they are made from.
const MENU: &[(&str, &[&str])] = &[
    ("Espresso", &["espresso"]),
    ("Americano", &["espresso", "water"]),
    ("Latte", &["espresso", "milk"]),
    ("Cappuccino", &["espresso", "milk", "foam"]),
    ("Flat White", &["espresso", "milk"]),
    ("Mocha", &["espresso", "milk", "cocoa"]),
    ("Macchiato", &["espresso", "foam"]),
    ("Chai Latte", &["tea", "milk", "cinnamon"]),
    ("Hot Chocolate", &["cocoa", "milk", "sugar"]),
    ("Matcha Latte", &["matcha", "milk"]),
    ("Iced Tea", &["tea", "ice", "lemon"]),
    ("Cold Brew", &["coffee", "ice"]),
];

/// Size variants with their price addon in cents.
const SIZES: &[(&str, i64)] = &[("Small", 0), ("Medium", 50), ("Large", 100)];

/// Extras mixed into some drinks.
const EXTRAS: &[&str] = &["sugar", "vanilla", "caramel", "oat milk", "hazelnut"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./coffee_shop.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Coffee Shop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of drinks to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./coffee_shop.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Coffee Shop Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Drinks:   {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let existing = db.drinks().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} drinks", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating drinks...");

    let started = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let drink = generate_drink(seed);

        if let Err(e) = drink.validate() {
            eprintln!("Skipping {}: {}", drink.name, e);
            continue;
        }

        if let Err(e) = db.drinks().create(&drink).await {
            eprintln!("Failed to insert {}: {}", drink.name, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} drinks...", generated);
        }
    }

    let elapsed = started.elapsed();
    println!();
    println!("✓ Generated {} drinks in {:?}", generated, elapsed);

    println!();
    println!("Verifying search...");
    let spec = DrinkSearchSpec::from_params([("ingredients", "milk"), ("limit", "10")])?;
    println!("  ingredients=milk: {} results", db.drinks().search(&spec).await?.len());
    let spec = DrinkSearchSpec::from_params([("name", "Latte Small")])?;
    println!("  name='Latte Small': {} results", db.drinks().search(&spec).await?.len());

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Generates one drink deterministically from `seed`.
fn generate_drink(seed: usize) -> Drink {
    let (base, ingredients) = MENU[seed % MENU.len()];
    let (size, addon) = SIZES[(seed / MENU.len()) % SIZES.len()];

    // $1.50 - $6.49 plus the size addon
    let cents = 150 + ((seed * 37) % 500) as i64 + addon;
    let price = format!("{}.{:02}", cents / 100, cents % 100);

    let mut all: Vec<&str> = ingredients.to_vec();
    if seed % 3 == 0 {
        all.push(EXTRAS[seed % EXTRAS.len()]);
    }

    let drink = Drink::new(format!("{} {}", base, size), price).with_ingredients(all);

    if seed % 2 == 0 {
        let now = Utc::now();
        let days = (seed % 30) as i64;
        drink.with_window(Some(now - Duration::days(days)), Some(now + Duration::days(days + 1)))
    } else {
        drink
    }
}
