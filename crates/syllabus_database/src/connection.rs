//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use syllabus_error::{DatabaseError, DatabaseErrorKind};
use tracing::info;

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Pooled PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn database_url() -> DatabaseResult<String> {
    std::env::var(DATABASE_URL_VAR).map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(format!(
            "{DATABASE_URL_VAR} environment variable not set"
        )))
    })
}

/// Establish a single connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    let url = database_url()?;
    Ok(PgConnection::establish(&url)?)
}

/// Build a connection pool from `DATABASE_URL`.
///
/// # Errors
///
/// Fails when the variable is missing or the pool cannot open its first connection.
pub fn establish_pool() -> DatabaseResult<PgPool> {
    let url = database_url()?;
    Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(url))
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Apply pending embedded migrations.
///
/// # Errors
///
/// Returns a `Migration` error if any migration fails.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "Applied database migrations");
    }
    Ok(())
}
