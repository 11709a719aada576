//! Goodwill Core - Shared domain types.
//!
//! This crate provides the types shared by every Goodwill Global Exports component:
//! - `server` - The catalog REST API and SPA host
//! - `cli` - Command-line tools for migrations and seeding
//! - `integration-tests` - Black-box API tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Database encoding for IDs is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, catalog and content entities, inquiries, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
