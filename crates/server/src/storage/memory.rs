//! In-memory storage backend.
//!
//! All tables live behind one mutex. The lock is only taken inside
//! synchronous sections, never across an `.await`, so compound operations
//! such as category lookup-or-create are atomic.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use goodwill_core::{
    Blog, BlogId, Category, CategoryId, NewBlog, NewProduct, NewTestimonial, NewUser, Product,
    ProductId, Testimonial, TestimonialId, User, UserId,
};

use super::{Storage, StorageError, StorageResult};

/// Process-lifetime store. Everything is discarded when it is dropped.
#[derive(Debug, Default)]
pub struct MemStorage {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    blogs: BTreeMap<BlogId, Blog>,
    testimonials: BTreeMap<TestimonialId, Testimonial>,
    sequences: Sequences,
}

/// Last id handed out per table; ids start at 1 and are never reused.
#[derive(Debug, Default)]
struct Sequences {
    users: i32,
    categories: i32,
    products: i32,
    blogs: i32,
    testimonials: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

impl MemStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> StorageResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl Storage for MemStorage {
    async fn get_user(&self, id: UserId) -> StorageResult<Option<User>> {
        Ok(self.tables()?.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StorageError::Conflict(format!(
                "username {} already exists",
                user.username
            )));
        }
        let id = UserId::new(next(&mut tables.sequences.users));
        let user = user.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn list_categories(&self) -> StorageResult<Vec<Category>> {
        Ok(self.tables()?.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> StorageResult<Option<Category>> {
        Ok(self.tables()?.categories.get(&id).cloned())
    }

    async fn create_category(&self, name: &str) -> StorageResult<Category> {
        let mut tables = self.tables()?;
        if let Some(existing) = tables.categories.values().find(|c| c.name == name) {
            return Ok(existing.clone());
        }
        let id = CategoryId::new(next(&mut tables.sequences.categories));
        let category = Category {
            id,
            name: name.to_owned(),
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn list_products(&self) -> StorageResult<Vec<Product>> {
        Ok(self.tables()?.products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> StorageResult<Option<Product>> {
        Ok(self.tables()?.products.get(&id).cloned())
    }

    async fn create_product(&self, product: NewProduct) -> StorageResult<Product> {
        let mut tables = self.tables()?;
        let id = ProductId::new(next(&mut tables.sequences.products));
        let product = product.into_product(id);
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> StorageResult<()> {
        self.tables()?.products.remove(&id);
        Ok(())
    }

    async fn list_blogs(&self) -> StorageResult<Vec<Blog>> {
        Ok(self.tables()?.blogs.values().cloned().collect())
    }

    async fn get_blog(&self, id: BlogId) -> StorageResult<Option<Blog>> {
        Ok(self.tables()?.blogs.get(&id).cloned())
    }

    async fn create_blog(&self, blog: NewBlog) -> StorageResult<Blog> {
        let mut tables = self.tables()?;
        let id = BlogId::new(next(&mut tables.sequences.blogs));
        let blog = blog.into_blog(id, Utc::now());
        tables.blogs.insert(id, blog.clone());
        Ok(blog)
    }

    async fn delete_blog(&self, id: BlogId) -> StorageResult<()> {
        self.tables()?.blogs.remove(&id);
        Ok(())
    }

    async fn list_testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        Ok(self.tables()?.testimonials.values().cloned().collect())
    }

    async fn get_testimonial(&self, id: TestimonialId) -> StorageResult<Option<Testimonial>> {
        Ok(self.tables()?.testimonials.get(&id).cloned())
    }

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial> {
        let mut tables = self.tables()?;
        let id = TestimonialId::new(next(&mut tables.sequences.testimonials));
        let testimonial = testimonial.into_testimonial(id, Utc::now());
        tables.testimonials.insert(id, testimonial.clone());
        Ok(testimonial)
    }

    async fn delete_testimonial(&self, id: TestimonialId) -> StorageResult<()> {
        self.tables()?.testimonials.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> StorageResult<()> {
        self.tables().map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_product(name: &str, category_id: CategoryId) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "Whole W180 grade cashew nuts".to_string(),
            price: None,
            image_url: "/images/product-grain.png".to_string(),
            category_id,
            gallery: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemStorage::new();
        let regular = store.create_category("Regular").await.unwrap();
        let a = store
            .create_product(new_product("Cashews", regular.id))
            .await
            .unwrap();
        let b = store
            .create_product(new_product("Basmati", regular.id))
            .await
            .unwrap();

        assert_eq!(a.id.as_i32(), 1);
        assert_eq!(b.id.as_i32(), 2);
        assert_eq!(store.get_product(b.id).await.unwrap(), Some(b));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemStorage::new();
        let regular = store.create_category("Regular").await.unwrap();
        let first = store
            .create_product(new_product("Cashews", regular.id))
            .await
            .unwrap();
        store.delete_product(first.id).await.unwrap();
        let second = store
            .create_product(new_product("Cardamom", regular.id))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemStorage::new();
        let blog = store
            .create_blog(NewBlog {
                title: "Grain market".to_string(),
                content: "Demand is rising".to_string(),
                image_url: "/images/product-grain.png".to_string(),
                author: "Market Analyst".to_string(),
                category: "General".to_string(),
            })
            .await
            .unwrap();

        store.delete_blog(blog.id).await.unwrap();
        store.delete_blog(blog.id).await.unwrap();
        store.delete_blog(BlogId::new(999)).await.unwrap();
        assert!(store.list_blogs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_category_is_lookup_or_create() {
        let store = MemStorage::new();
        let first = store.create_category("Seasonal").await.unwrap();
        let second = store.create_category("Seasonal").await.unwrap();
        let other = store.create_category("Regular").await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first.id, other.id);
        assert_eq!(store.list_categories().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_category_creation_yields_one_row() {
        let store = Arc::new(MemStorage::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_category("Dry Fruits").await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_testimonial_gets_creation_time() {
        let store = MemStorage::new();
        let before = Utc::now();
        let testimonial = store
            .create_testimonial(NewTestimonial {
                name: "Elena Rossi".to_string(),
                role: "Procurement Manager, Italia Foods".to_string(),
                content: "Consistently exceptional saffron.".to_string(),
                image_url: "/images/product-spice.png".to_string(),
            })
            .await
            .unwrap();

        assert!(testimonial.created_at >= before);
        assert_eq!(
            store.get_testimonial(testimonial.id).await.unwrap(),
            Some(testimonial)
        );
    }

    #[tokio::test]
    async fn test_usernames_are_unique() {
        let store = MemStorage::new();
        let user = store
            .create_user(NewUser {
                username: "admin".to_string(),
                password: "s3cret-hash".to_string(),
            })
            .await
            .unwrap();

        let dup = store
            .create_user(NewUser {
                username: "admin".to_string(),
                password: "other".to_string(),
            })
            .await;
        assert!(matches!(dup, Err(StorageError::Conflict(_))));

        assert_eq!(
            store.get_user_by_username("admin").await.unwrap(),
            Some(user.clone())
        );
        assert_eq!(store.get_user(user.id).await.unwrap(), Some(user));
        assert_eq!(store.get_user(UserId::new(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = MemStorage::new();
        let regular = store.create_category("Regular").await.unwrap();
        store
            .create_product(new_product("Cashews", regular.id))
            .await
            .unwrap();
        drop(store);

        let restarted = MemStorage::new();
        assert!(restarted.list_products().await.unwrap().is_empty());
        assert!(restarted.list_categories().await.unwrap().is_empty());
    }
}
