//! Integration tests for Storedash.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and start the dashboard
//! cargo run -p storedash-cli -- migrate
//! cargo run -p storedash-admin
//!
//! # Run integration tests
//! cargo test -p storedash-integration-tests -- --ignored
//! ```
//!
//! `DASHBOARD_BASE_URL` points the tests at another server. Schema tests
//! connect to `DASHBOARD_DATABASE_URL` (or `DATABASE_URL`) directly.

use sqlx::PgPool;
use storedash_client::DashboardClient;
use storedash_core::Store;

/// Base URL of the dashboard under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("DASHBOARD_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A fresh owner id, so tests never see each other's stores.
#[must_use]
pub fn unique_owner() -> String {
    format!("it_{}", uuid::Uuid::new_v4().simple())
}

/// Client acting as `owner`.
///
/// # Panics
///
/// Panics if `DASHBOARD_BASE_URL` is not a valid URL.
#[must_use]
pub fn client_for(owner: &str) -> DashboardClient {
    DashboardClient::new(&base_url())
        .expect("valid DASHBOARD_BASE_URL")
        .with_owner(owner)
}

/// Anonymous client, as a storefront would use.
///
/// # Panics
///
/// Panics if `DASHBOARD_BASE_URL` is not a valid URL.
#[must_use]
pub fn public_client() -> DashboardClient {
    DashboardClient::new(&base_url()).expect("valid DASHBOARD_BASE_URL")
}

/// A fresh owner with one store.
///
/// # Panics
///
/// Panics if the store cannot be created.
pub async fn owner_with_store() -> (DashboardClient, Store) {
    let client = client_for(&unique_owner());
    let store = client
        .create_store("Integration store")
        .await
        .expect("create store");
    (client, store)
}

/// Raw HTTP client for dashboard pages; redirects are not followed so tests
/// can assert on them.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn page_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Pool on the dashboard database, for tests that check the schema itself.
///
/// # Panics
///
/// Panics if no database URL is set or the database is unreachable.
pub async fn database_pool() -> PgPool {
    let url = std::env::var("DASHBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("DASHBOARD_DATABASE_URL or DATABASE_URL");
    PgPool::connect(&url).await.expect("connect to database")
}
