//! vlog - blog platform backend
//!
//! This library provides the post search core of the vlog backend: tag-set
//! filters, spacing-tolerant keyword matching, stable sorting and paginated
//! reads over SQLite or MySQL, exposed through an axum router.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
