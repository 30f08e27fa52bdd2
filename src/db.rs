use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::migration::Migrator;

/// Create a SeaORM connection.
///
/// An in-memory SQLite database lives inside a single connection, so the pool
/// is pinned to exactly one connection for such URLs.
pub async fn create_orm_conn(database_url: &str, max_connections: u32) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    if is_in_memory_sqlite(database_url) {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(max_connections);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Create the schema if it is not there yet.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}

fn is_in_memory_sqlite(database_url: &str) -> bool {
    database_url.starts_with("sqlite") && database_url.contains(":memory:")
}

#[cfg(test)]
mod tests {
    use super::is_in_memory_sqlite;

    #[test]
    fn detects_in_memory_sqlite_urls() {
        assert!(is_in_memory_sqlite("sqlite::memory:"));
        assert!(is_in_memory_sqlite("sqlite://:memory:"));
        assert!(!is_in_memory_sqlite("sqlite://data/inventory.db?mode=rwc"));
        assert!(!is_in_memory_sqlite("postgres://localhost/inventory"));
    }
}
