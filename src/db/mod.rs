//! Database layer
//!
//! SQLite (default) and MySQL are both supported behind the `DatabasePool`
//! trait. The driver is selected from configuration and decides which SQL
//! dialect the query builders in `query` render.
//!
//! # Usage
//!
//! ```ignore
//! use vlog::config::DatabaseConfig;
//! use vlog::db::{create_pool, ensure_schema};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! ensure_schema(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod pool;
pub mod query;
pub mod repositories;
pub mod schema;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};
pub use schema::ensure_schema;
