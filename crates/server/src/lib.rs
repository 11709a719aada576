//! Goodwill Global Exports catalog server library.
//!
//! This crate provides the API server as a library, allowing it to be
//! tested in-process and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod listener;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;
