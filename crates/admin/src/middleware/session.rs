//! Session middleware configuration and flash notices.
//!
//! Sessions live in `dashboard.session` and only carry one-shot notices
//! across redirects ("Billboard created", conflict messages, ...).

use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use storedash_core::Notice;

use crate::config::DashboardConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "storedash_session";

/// Session key of the pending notice.
const NOTICE_KEY: &str = "notice";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (never happens with
/// the hardcoded "dashboard" and "session" values).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &DashboardConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The session table is created by the dashboard migration.
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("dashboard")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Queue a notice for the next page.
///
/// Failures are logged and swallowed: losing a toast must not fail the
/// request that already succeeded.
pub async fn flash(session: &Session, notice: Notice) {
    if let Err(e) = session.insert(NOTICE_KEY, notice).await {
        tracing::warn!(error = %e, "Failed to store flash notice");
    }
}

/// Take the pending notice, if any.
pub async fn take_notice(session: &Session) -> Option<Notice> {
    match session.remove::<Notice>(NOTICE_KEY).await {
        Ok(notice) => notice,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash notice");
            None
        }
    }
}
