//! `PgStorage` against a real database.
//!
//! These tests need `TEST_DATABASE_URL` pointing at a disposable database:
//!
//! ```bash
//! TEST_DATABASE_URL=postgres://localhost/goodwill_test \
//!     cargo test -p goodwill-integration-tests --test postgres_storage -- --ignored
//! ```

use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use goodwill_core::{NewBlog, NewProduct, NewTestimonial};
use goodwill_server::db::create_pool;
use goodwill_server::storage::{PgStorage, Storage};

async fn pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = create_pool(&SecretString::from(url))
        .await
        .expect("connect to test database");
    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_rows_survive_a_new_pool() {
    let name = unique("Clove Buds");
    let category_name = unique("Spices");

    let product_id = {
        let storage = PgStorage::new(pool().await);
        let category = storage.create_category(&category_name).await.unwrap();
        let product = storage
            .create_product(NewProduct {
                name: name.clone(),
                description: "Hand-picked Zanzibar cloves".to_string(),
                price: Some(540),
                image_url: "/images/product-spice.png".to_string(),
                category_id: category.id,
                gallery: vec!["/images/clove-1.png".to_string()],
            })
            .await
            .unwrap();
        storage.pool().close().await;
        product.id
    };

    let storage = PgStorage::new(pool().await);
    let product = storage.get_product(product_id).await.unwrap().unwrap();
    assert_eq!(product.name, name);
    assert_eq!(product.price, Some(540));
    assert_eq!(product.gallery, ["/images/clove-1.png"]);

    storage.delete_product(product_id).await.unwrap();
    storage.delete_product(product_id).await.unwrap();
    assert!(storage.get_product(product_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_concurrent_category_creation_yields_one_row() {
    let storage = PgStorage::new(pool().await);
    let name = unique("Pulses");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let storage = storage.clone();
        let name = name.clone();
        handles.push(tokio::spawn(async move {
            storage.create_category(&name).await.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let matching = storage
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .filter(|c| c.name == name)
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
#[ignore = "Requires TEST_DATABASE_URL"]
async fn test_content_round_trip() {
    let storage = PgStorage::new(pool().await);
    let title = unique("Monsoon crop outlook");

    let blog = storage
        .create_blog(NewBlog {
            title: title.clone(),
            content: "Early rains favour the kharif sowing.".to_string(),
            author: "Market Analyst".to_string(),
            image_url: "/images/hero-bg.png".to_string(),
            category: "Market Analysis".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(storage.get_blog(blog.id).await.unwrap().unwrap().title, title);

    let testimonial = storage
        .create_testimonial(NewTestimonial {
            name: unique("Buyer"),
            role: "Procurement Lead".to_string(),
            content: "Consistent grading across every lot.".to_string(),
            image_url: "/images/product-grain.png".to_string(),
        })
        .await
        .unwrap();
    assert!(testimonial.created_at <= chrono::Utc::now());

    storage.delete_blog(blog.id).await.unwrap();
    storage.delete_testimonial(testimonial.id).await.unwrap();
    assert!(storage.get_blog(blog.id).await.unwrap().is_none());
    storage.ping().await.unwrap();
}
