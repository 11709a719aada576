//! Seed an empty database with the built-in sample content.
//!
//! Only tables with no rows are filled, so this is safe to repeat.

use goodwill_server::seed::seed_if_empty;
use goodwill_server::storage::PgStorage;

use super::{CommandError, connect};

/// Seed categories, products, blogs, and testimonials.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let storage = PgStorage::new(connect().await?);
    let report = seed_if_empty(&storage).await?;

    if report.is_noop() {
        tracing::info!("Nothing to seed; every table already has rows");
    } else {
        tracing::info!("Seeding complete!");
        tracing::info!("  Categories inserted:   {}", report.categories);
        tracing::info!("  Products inserted:     {}", report.products);
        tracing::info!("  Blogs inserted:        {}", report.blogs);
        tracing::info!("  Testimonials inserted: {}", report.testimonials);
    }
    Ok(())
}
