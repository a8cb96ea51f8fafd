//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sd-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migrations live in `crates/admin/migrations/` and are embedded in the
//! admin crate; the server never runs them itself.

use storedash_admin::db;

use super::{CommandError, database_url};

/// Run the dashboard migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to dashboard database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running dashboard migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Dashboard migrations complete!");
    Ok(())
}
