//! Editorial content: blog posts and customer testimonials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BlogId, TestimonialId};

/// Blog category used when the author does not pick one.
pub const DEFAULT_BLOG_CATEGORY: &str = "General";

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub category: String,
    /// Set by storage on insert, never changed afterwards.
    pub created_at: DateTime<Utc>,
}

/// Fields required to publish a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub category: String,
}

impl NewBlog {
    /// Attach the storage-assigned ID and creation time.
    #[must_use]
    pub fn into_blog(self, id: BlogId, created_at: DateTime<Utc>) -> Blog {
        Blog {
            id,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            author: self.author,
            category: self.category,
            created_at,
        }
    }
}

/// A customer quote shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    /// Job title and company, e.g. "Procurement Manager, Italia Foods".
    pub role: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to add a testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub name: String,
    pub role: String,
    pub content: String,
    pub image_url: String,
}

impl NewTestimonial {
    /// Attach the storage-assigned ID and creation time.
    #[must_use]
    pub fn into_testimonial(self, id: TestimonialId, created_at: DateTime<Utc>) -> Testimonial {
        Testimonial {
            id,
            name: self.name,
            role: self.role,
            content: self.content,
            image_url: self.image_url,
            created_at,
        }
    }
}
