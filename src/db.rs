//! Database connection management
//!
//! The pool is initialized once at startup and shared process-wide, so
//! request handlers can reach it without threading a handle through actix
//! application data.

use once_cell::sync::OnceCell;
use sea_orm::{Database, DatabaseConnection};

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the database and store the pool. Call once at startup.
pub async fn init_db(database_url: String) {
    let pool = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    DB_POOL
        .set(pool)
        .expect("Database pool already initialized");
}

/// Returns the global connection pool.
pub fn get_db_pool() -> &'static DatabaseConnection {
    DB_POOL.get().expect("Database pool not initialized")
}
