//! # Seed Data Generator
//!
//! Populates a development database with a demo seller.
//!
//! ## Usage
//! ```bash
//! # Seed using DATABASE_URL
//! cargo run -p bazaar-db --bin seed
//!
//! # Custom order count and database
//! cargo run -p bazaar-db --bin seed -- --orders 200 --url postgres://localhost/bazaar_dev
//! ```
//!
//! ## Generated Data
//! - One seller user plus a handful of buyers
//! - A seller profile ("Demo Crafts Co.")
//! - Products, a quarter of them inactive
//! - Orders spread over every status, each with a payment
//! - One paid payout covering the oldest delivered orders
//!
//! The seller's user id is printed at the end; issue a token for it to
//! try the API.

use std::env;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bazaar_core::{
    CommissionRate, Money, OrderStatus, PaymentStatus, PayoutStatus, SellerApplication, UserRole,
};
use bazaar_db::{Database, DbConfig, SellerStore};

const PRODUCT_NAMES: &[&str] = &[
    "Hand-thrown Mug",
    "Woven Basket",
    "Beeswax Candle",
    "Linen Tea Towel",
    "Walnut Cutting Board",
    "Ceramic Planter",
    "Knitted Scarf",
    "Leather Card Holder",
    "Pressed Flower Print",
    "Soy Wax Melt Set",
    "Cotton Tote Bag",
    "Olive Wood Spoon",
];

/// Simple deterministic generator so repeated seeds look alike.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next() % (hi - lo) as u64) as i64
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut order_count: usize = 60;
    let mut url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| String::from("postgres://localhost/bazaar_dev"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--orders" | "-o" => {
                if i + 1 < args.len() {
                    order_count = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--url" | "-u" => {
                if i + 1 < args.len() {
                    url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --orders <N>   Number of orders to generate (default: 60)");
                println!("  -u, --url <URL>    PostgreSQL URL (default: $DATABASE_URL)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bazaar Seed Data Generator");
    println!("============================");
    println!("Orders: {}", order_count);
    println!();

    let db = Database::new(DbConfig::new(&url)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seller_profiles")
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} seller profiles", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let pool = db.pool();
    let mut rng = Lcg(42);

    // Users
    let seller_user = Uuid::new_v4();
    insert_user(pool, seller_user, "seller@demo.bazaar", UserRole::Seller).await?;
    let mut buyers = Vec::new();
    for n in 0..5 {
        let buyer = Uuid::new_v4();
        insert_user(pool, buyer, &format!("buyer{}@demo.bazaar", n), UserRole::Buyer).await?;
        buyers.push(buyer);
    }
    println!("✓ Created {} users", buyers.len() + 1);

    // Seller profile
    let profile = db
        .sellers()
        .create(
            &SellerApplication {
                business_name: "Demo Crafts Co.".to_string(),
                business_type: Some("handmade".to_string()),
                description: Some("Small-batch homeware".to_string()),
                business_email: Some("hello@demo.bazaar".to_string()),
                ..SellerApplication::default()
            }
            .into_profile(seller_user, Utc::now()),
        )
        .await?;
    println!("✓ Created seller profile {}", profile.id);

    // Products
    for (n, name) in PRODUCT_NAMES.iter().enumerate() {
        sqlx::query(
            "INSERT INTO products (id, seller_id, name, price_cents, is_active) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(profile.id)
        .bind(*name)
        .bind(rng.range(500, 8_000))
        .bind(n % 4 != 3)
        .execute(pool)
        .await?;
    }
    println!("✓ Created {} products", PRODUCT_NAMES.len());

    // Orders and payments, oldest first
    let commission = CommissionRate::DEFAULT;
    let now = Utc::now();
    let mut delivered = Vec::new();
    for n in 0..order_count {
        let status = OrderStatus::ALL[n % OrderStatus::ALL.len()];
        let total = Money::from_cents(rng.range(1_000, 25_000));
        let created_at = now - Duration::hours((order_count - n) as i64 * 6);
        let order_id = Uuid::new_v4();

        let shipped_at = matches!(status, OrderStatus::Shipped | OrderStatus::Delivered)
            .then(|| created_at + Duration::days(1));
        let delivered_at =
            (status == OrderStatus::Delivered).then(|| created_at + Duration::days(3));

        sqlx::query(
            r#"
            INSERT INTO orders (id, seller_id, buyer_id, status, total_cents,
                                shipped_at, delivered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            "#,
        )
        .bind(order_id)
        .bind(profile.id)
        .bind(buyers[n % buyers.len()])
        .bind(status.as_str())
        .bind(total.cents())
        .bind(shipped_at)
        .bind(delivered_at)
        .bind(created_at)
        .execute(pool)
        .await?;

        let payment_status = match status {
            OrderStatus::Pending => PaymentStatus::Pending,
            OrderStatus::Cancelled => PaymentStatus::Refunded,
            _ => PaymentStatus::Succeeded,
        };
        sqlx::query(
            r#"
            INSERT INTO payments (id, order_id, status, amount_cents, platform_fee_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(payment_status.as_str())
        .bind(total.cents())
        .bind(commission.fee_on(total).cents())
        .bind(created_at)
        .execute(pool)
        .await?;

        if status == OrderStatus::Delivered {
            delivered.push((order_id, total - commission.fee_on(total)));
        }
    }
    println!("✓ Created {} orders with payments", order_count);

    // One paid payout over the older half of delivered orders
    let covered = &delivered[..delivered.len() / 2];
    if !covered.is_empty() {
        let payout_id = Uuid::new_v4();
        let amount: Money = covered.iter().map(|(_, net)| *net).sum();
        sqlx::query(
            "INSERT INTO payouts (id, seller_id, status, amount_cents) VALUES ($1, $2, $3, $4)",
        )
        .bind(payout_id)
        .bind(profile.id)
        .bind(PayoutStatus::Paid.as_str())
        .bind(amount.cents())
        .execute(pool)
        .await?;
        for (order_id, _) in covered {
            sqlx::query("INSERT INTO payout_orders (payout_id, order_id) VALUES ($1, $2)")
                .bind(payout_id)
                .bind(order_id)
                .execute(pool)
                .await?;
        }
        println!("✓ Created paid payout {} over {} orders ({})", payout_id, covered.len(), amount);
    }

    println!();
    println!("Seller user id: {}", seller_user);
    Ok(())
}

async fn insert_user(pool: &PgPool, id: Uuid, email: &str, role: UserRole) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO users (id, email, role) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(role.as_str())
        .execute(pool)
        .await?;
    Ok(())
}
