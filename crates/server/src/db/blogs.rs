//! Blog post repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use goodwill_core::{Blog, BlogId, NewBlog};

use super::RepositoryError;

const BLOG_COLUMNS: &str = "id, title, content, image_url, author, category, created_at";

#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: BlogId,
    title: String,
    content: String,
    image_url: String,
    author: String,
    category: String,
    created_at: DateTime<Utc>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            author: row.author,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

/// Repository for blog database operations.
pub struct BlogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogRepository<'a> {
    /// Create a new blog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all blog posts in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Blog>, RepositoryError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Blog::from).collect())
    }

    /// Get a blog post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BlogId) -> Result<Option<Blog>, RepositoryError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Blog::from))
    }

    /// Insert a blog post. `created_at` is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, blog), fields(title = %blog.title))]
    pub async fn create(&self, blog: &NewBlog) -> Result<Blog, RepositoryError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r"
            INSERT INTO blogs (title, content, image_url, author, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BLOG_COLUMNS}
            "
        ))
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(&blog.image_url)
        .bind(&blog.author)
        .bind(&blog.category)
        .fetch_one(self.pool)
        .await?;

        debug!(id = %row.id, "Inserted blog");
        Ok(row.into())
    }

    /// Delete a blog post. Missing IDs are not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: BlogId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Count stored blog posts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blogs")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
