//! Core types for the catalog.
//!
//! This module provides type-safe wrappers and entity definitions for the
//! catalog domain.

pub mod catalog;
pub mod content;
pub mod email;
pub mod id;
pub mod inquiry;
pub mod user;

pub use catalog::{Category, DEFAULT_CATEGORY, NewProduct, Product, UNCATEGORIZED};
pub use content::{Blog, DEFAULT_BLOG_CATEGORY, NewBlog, NewTestimonial, Testimonial};
pub use email::{Email, EmailError};
pub use id::*;
pub use inquiry::{ContactInquiry, QuoteRequest};
pub use user::{NewUser, User};
