//! Seed the product catalogue with sample data.
//!
//! # Usage
//!
//! ```bash
//! atelier-cli seed
//! ```
//!
//! Seeding is idempotent: a non-empty catalogue is left untouched.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use super::migrate::database_url;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Sample catalogue: (name, price in cents, description, image, designer notes).
const SAMPLE_PRODUCTS: &[(&str, i64, &str, &str, &str)] = &[
    (
        "Cora Slip Dress",
        12900,
        "A bias-cut slip dress in washed silk.",
        "/images/cora-slip-dress.jpg",
        "Cut on the bias so the silk follows the body without clinging.",
    ),
    (
        "Mara Wool Coat",
        24900,
        "Double-faced wool coat with a shawl collar.",
        "/images/mara-wool-coat.jpg",
        "The collar is hand-finished; no facing, no lining, one seam.",
    ),
    (
        "Isla Linen Shirt",
        7900,
        "Relaxed shirt in heavyweight Irish linen.",
        "/images/isla-linen-shirt.jpg",
        "Garment-dyed after construction for a lived-in hand feel.",
    ),
    (
        "Noor Silk Scarf",
        4999,
        "Hand-rolled square scarf in printed twill.",
        "/images/noor-silk-scarf.jpg",
        "Print drawn from an archive textile, recolored for this season.",
    ),
    (
        "Vela Knit Skirt",
        9900,
        "A-line midi skirt in merino rib.",
        "/images/vela-knit-skirt.jpg",
        "Fully fashioned knit; the panels are linked, never cut.",
    ),
];

/// Insert the sample catalogue if the `product` table is empty.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a query fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = database_url().map_err(|_| SeedError::MissingEnvVar("ATELIER_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM product")
        .fetch_one(&pool)
        .await?;

    if count > 0 {
        info!(count, "catalogue already seeded, skipping");
        return Ok(());
    }

    for (name, cents, description, image_url, designer_notes) in SAMPLE_PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO product (name, price, description, image_url, designer_notes)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(name)
        .bind(Decimal::new(*cents, 2))
        .bind(description)
        .bind(image_url)
        .bind(designer_notes)
        .execute(&pool)
        .await?;
    }

    info!(count = SAMPLE_PRODUCTS.len(), "catalogue seeded");
    Ok(())
}
