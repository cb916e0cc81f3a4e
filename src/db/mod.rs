//! Database module
//!
//! This module defines the [`Store`] boundary and its PostgreSQL and
//! in-memory implementations.

pub mod connection;
pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
