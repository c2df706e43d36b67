use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::calendar::CalendarPolicyStore;
use crate::domain::services::locks::CourtLocks;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_court_repo::SqliteCourtRepo,
    sqlite_policy_repo::SqlitePolicyRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

    build_state(config.clone(), pool)
}

pub fn build_state(config: Config, pool: SqlitePool) -> AppState {
    let policy_repo = Arc::new(SqlitePolicyRepo::new(pool.clone()));

    AppState {
        config,
        court_repo: Arc::new(SqliteCourtRepo::new(pool.clone())),
        booking_repo: Arc::new(SqliteBookingRepo::new(pool)),
        policy_store: Arc::new(CalendarPolicyStore::new(policy_repo)),
        court_locks: Arc::new(CourtLocks::new()),
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
