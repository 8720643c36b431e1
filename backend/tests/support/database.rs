//! Opt-in PostgreSQL access for settlement suites.
//!
//! Suites that need a real database read `BOX_OFFICE_TEST_DATABASE_URL`.
//! When it is unset they print a skip marker and return early, so the
//! default test run stays hermetic.

use box_office::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Environment variable naming the scratch database.
pub const TEST_DATABASE_URL: &str = "BOX_OFFICE_TEST_DATABASE_URL";

/// Migrated pool for the scratch database, or `None` when not configured.
///
/// # Panics
///
/// Panics when the URL is set but migrations or pool construction fail, so
/// CI breakage is not masked as a skip.
pub async fn migrated_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
        eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL} is not set");
        return None;
    };
    run_pending_migrations(&url)
        .await
        .unwrap_or_else(|err| panic!("migrations failed on {TEST_DATABASE_URL}: {err}"));
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(4).with_min_idle(None))
        .await
        .unwrap_or_else(|err| panic!("pool construction failed: {err}"));
    Some(pool)
}
