//! Testimonial repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use goodwill_core::{NewTestimonial, Testimonial, TestimonialId};

use super::RepositoryError;

const TESTIMONIAL_COLUMNS: &str = "id, name, role, content, image_url, created_at";

#[derive(Debug, sqlx::FromRow)]
struct TestimonialRow {
    id: TestimonialId,
    name: String,
    role: String,
    content: String,
    image_url: String,
    created_at: DateTime<Utc>,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            role: row.role,
            content: row.content,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Repository for testimonial database operations.
pub struct TestimonialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TestimonialRepository<'a> {
    /// Create a new testimonial repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all testimonials in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as::<_, TestimonialRow>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    /// Get a testimonial by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: TestimonialId) -> Result<Option<Testimonial>, RepositoryError> {
        let row = sqlx::query_as::<_, TestimonialRow>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Testimonial::from))
    }

    /// Insert a testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        testimonial: &NewTestimonial,
    ) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as::<_, TestimonialRow>(&format!(
            r"
            INSERT INTO testimonials (name, role, content, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {TESTIMONIAL_COLUMNS}
            "
        ))
        .bind(&testimonial.name)
        .bind(&testimonial.role)
        .bind(&testimonial.content)
        .bind(&testimonial.image_url)
        .fetch_one(self.pool)
        .await?;
        Ok(row.into())
    }

    /// Delete a testimonial. Missing IDs are not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Count stored testimonials.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM testimonials")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
