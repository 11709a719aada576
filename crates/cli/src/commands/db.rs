//! Database diagnostics.

use chrono::{DateTime, Utc};

use goodwill_server::db::{
    BlogRepository, CategoryRepository, ProductRepository, TestimonialRepository,
};

use super::{CommandError, connect};

/// Check connectivity and report the server clock and row counts.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a table is missing
/// (run `gge-cli migrate` first).
pub async fn ping() -> Result<(), CommandError> {
    let pool = connect().await?;

    let (now,): (DateTime<Utc>,) = sqlx::query_as("SELECT now()").fetch_one(&pool).await?;
    tracing::info!(server_time = %now, "Database connection successful");

    let counts = [
        ("categories", CategoryRepository::new(&pool).count().await),
        ("products", ProductRepository::new(&pool).count().await),
        ("blogs", BlogRepository::new(&pool).count().await),
        ("testimonials", TestimonialRepository::new(&pool).count().await),
    ];
    for (table, count) in counts {
        match count {
            Ok(rows) => tracing::info!("  {table}: {rows} rows"),
            Err(e) => tracing::warn!("  {table}: unavailable ({e})"),
        }
    }
    Ok(())
}
