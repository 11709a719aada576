//! First-run sample content.
//!
//! [`seed_if_empty`] fills each empty table with a fixed set of rows. Tables
//! that already hold data are left untouched, so running it on every start
//! is harmless. There is no transaction: a failure part way through leaves
//! the rows inserted so far, and that table counts as seeded next time.

mod data;

use std::fmt;

use tracing::{info, instrument};

use goodwill_core::{NewBlog, NewProduct, NewTestimonial};

use crate::storage::{Storage, StorageError};

/// Rows inserted per table by one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub blogs: usize,
    pub testimonials: usize,
}

impl SeedReport {
    /// True when every table already had data.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.categories == 0 && self.products == 0 && self.blogs == 0 && self.testimonials == 0
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} categories, {} products, {} blogs, {} testimonials",
            self.categories, self.products, self.blogs, self.testimonials
        )
    }
}

/// Seed categories, products, blogs, and testimonials, in that order,
/// skipping any table that already has rows.
///
/// # Errors
///
/// Returns the first `StorageError` encountered.
#[instrument(skip(storage))]
pub async fn seed_if_empty<S: Storage>(storage: &S) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    if storage.list_categories().await?.is_empty() {
        for name in data::CATEGORIES {
            storage.create_category(name).await?;
            report.categories += 1;
        }
    }

    if storage.list_products().await?.is_empty() {
        for seed in data::PRODUCTS {
            let category = storage.create_category(seed.category).await?;
            storage
                .create_product(NewProduct {
                    name: seed.name.to_owned(),
                    description: seed.description.to_owned(),
                    price: None,
                    image_url: seed.image_url.to_owned(),
                    category_id: category.id,
                    gallery: Vec::new(),
                })
                .await?;
            report.products += 1;
        }
    }

    if storage.list_blogs().await?.is_empty() {
        for seed in data::BLOGS {
            storage
                .create_blog(NewBlog {
                    title: seed.title.to_owned(),
                    content: seed.content.to_owned(),
                    image_url: seed.image_url.to_owned(),
                    author: seed.author.to_owned(),
                    category: seed.category.to_owned(),
                })
                .await?;
            report.blogs += 1;
        }
    }

    if storage.list_testimonials().await?.is_empty() {
        for seed in data::TESTIMONIALS {
            storage
                .create_testimonial(NewTestimonial {
                    name: seed.name.to_owned(),
                    role: seed.role.to_owned(),
                    content: seed.content.to_owned(),
                    image_url: seed.image_url.to_owned(),
                })
                .await?;
            report.testimonials += 1;
        }
    }

    if report.is_noop() {
        info!("Seed skipped, all tables already populated");
    } else {
        info!(%report, "Seeded sample content");
    }
    Ok(report)
}
