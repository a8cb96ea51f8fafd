//! Database operations for the dashboard `PostgreSQL` database.
//!
//! ## Tables (schema `dashboard`)
//!
//! - `store` - Tenants, one per owner shop
//! - `billboard`, `category`, `size`, `color` - Catalogue building blocks
//! - `product`, `image` - Products and their ordered images
//! - `order`, `order_item` - Orders written by the storefront checkout
//! - `session` - Dashboard sessions (flash notices)
//!
//! Every per-store table has `UNIQUE (store_id, id)`, and references between
//! them are composite foreign keys `(store_id, ref_id)`. A record can
//! therefore only ever point at a record of the same store, and the database
//! rejects deleting anything that is still referenced.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p storedash-cli -- migrate
//! ```

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use billboards::BillboardRepository;
pub use categories::CategoryRepository;
pub use colors::ColorRepository;
pub use orders::{NewOrder, OrderRepository};
pub use products::{ProductFilter, ProductRepository};
pub use sizes::SizeRepository;
pub use stores::{StoreCounts, StoreRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found (or belongs to another store).
    #[error("not found")]
    NotFound,

    /// The entity is still referenced and cannot be deleted.
    #[error("still referenced: {0}")]
    Conflict(String),

    /// A write referenced an entity that does not exist in the store.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A write carried a number its column cannot hold.
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

impl RepositoryError {
    /// Map a failed `INSERT`/`UPDATE`: a foreign-key violation means the
    /// payload referenced something outside the store, a numeric overflow
    /// means it slipped past validation.
    pub(crate) fn on_write(err: sqlx::Error) -> Self {
        if let Some(constraint) = foreign_key_constraint(&err) {
            return Self::InvalidReference(constraint);
        }
        match err.as_database_error() {
            Some(db_err) if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
                Self::OutOfRange(db_err.message().to_string())
            }
            _ => Self::Database(err),
        }
    }

    /// Map a failed `DELETE`: a foreign-key violation means dependents exist.
    pub(crate) fn on_delete(err: sqlx::Error) -> Self {
        match foreign_key_constraint(&err) {
            Some(constraint) => Self::Conflict(constraint),
            None => Self::Database(err),
        }
    }
}

fn foreign_key_constraint(err: &sqlx::Error) -> Option<String> {
    let db_err = err.as_database_error()?;
    matches!(db_err.kind(), ErrorKind::ForeignKeyViolation)
        .then(|| db_err.constraint().unwrap_or("foreign key").to_string())
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Embedded migrations for the dashboard database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
