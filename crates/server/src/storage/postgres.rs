//! `PostgreSQL` storage backend.

use sqlx::PgPool;

use goodwill_core::{
    Blog, BlogId, Category, CategoryId, NewBlog, NewProduct, NewTestimonial, NewUser, Product,
    ProductId, Testimonial, TestimonialId, User, UserId,
};

use super::{Storage, StorageError, StorageResult};
use crate::db::{
    BlogRepository, CategoryRepository, ProductRepository, RepositoryError, TestimonialRepository,
    UserRepository,
};

/// Storage backed by a connection pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for callers that need raw queries.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Surface uniqueness failures as storage conflicts.
fn lift(err: RepositoryError) -> StorageError {
    match err {
        RepositoryError::Conflict(what) => StorageError::Conflict(what),
        other => StorageError::Repository(other),
    }
}

impl Storage for PgStorage {
    async fn get_user(&self, id: UserId) -> StorageResult<Option<User>> {
        Ok(UserRepository::new(&self.pool).get_by_id(id).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(UserRepository::new(&self.pool)
            .get_by_username(username)
            .await?)
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        UserRepository::new(&self.pool)
            .create(&user)
            .await
            .map_err(lift)
    }

    async fn list_categories(&self) -> StorageResult<Vec<Category>> {
        Ok(CategoryRepository::new(&self.pool).list().await?)
    }

    async fn get_category(&self, id: CategoryId) -> StorageResult<Option<Category>> {
        Ok(CategoryRepository::new(&self.pool).get(id).await?)
    }

    async fn create_category(&self, name: &str) -> StorageResult<Category> {
        Ok(CategoryRepository::new(&self.pool)
            .find_or_create(name)
            .await?)
    }

    async fn list_products(&self) -> StorageResult<Vec<Product>> {
        Ok(ProductRepository::new(&self.pool).list().await?)
    }

    async fn get_product(&self, id: ProductId) -> StorageResult<Option<Product>> {
        Ok(ProductRepository::new(&self.pool).get(id).await?)
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        Ok(ProductRepository::new(&self.pool).create(&product).await?)
    }

    async fn delete_product(&self, id: ProductId) -> StorageResult<()> {
        Ok(ProductRepository::new(&self.pool).delete(id).await?)
    }

    async fn list_blogs(&self) -> StorageResult<Vec<Blog>> {
        Ok(BlogRepository::new(&self.pool).list().await?)
    }

    async fn get_blog(&self, id: BlogId) -> StorageResult<Option<Blog>> {
        Ok(BlogRepository::new(&self.pool).get(id).await?)
    }

    async fn create_blog(&self, blog: NewBlog) -> StorageResult<Blog> {
        Ok(BlogRepository::new(&self.pool).create(&blog).await?)
    }

    async fn delete_blog(&self, id: BlogId) -> StorageResult<()> {
        Ok(BlogRepository::new(&self.pool).delete(id).await?)
    }

    async fn list_testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        Ok(TestimonialRepository::new(&self.pool).list().await?)
    }

    async fn get_testimonial(&self, id: TestimonialId) -> StorageResult<Option<Testimonial>> {
        Ok(TestimonialRepository::new(&self.pool).get(id).await?)
    }

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial> {
        Ok(TestimonialRepository::new(&self.pool)
            .create(&testimonial)
            .await?)
    }

    async fn delete_testimonial(&self, id: TestimonialId) -> StorageResult<()> {
        Ok(TestimonialRepository::new(&self.pool).delete(id).await?)
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }
}
