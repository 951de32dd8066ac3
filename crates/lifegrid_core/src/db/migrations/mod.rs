//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - A database newer than `latest_version()` is never modified.
//! - Every table registered by a migration at or below the recorded version
//!   must exist; a version stamp without its tables is rejected.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
    /// Tables this migration creates.
    tables: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_day_logs.sql"),
        tables: &["day_logs"],
    },
    Migration {
        version: 2,
        sql: include_str!("0002_daily_summaries.sql"),
        tables: &["daily_summaries"],
    },
    Migration {
        version: 3,
        sql: include_str!("0003_dreams_events.sql"),
        tables: &["dreams", "notable_events"],
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return verify_tables(conn, latest);
    }
    verify_tables(conn, current_version)?;

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(
            "event=db_migrate module=db status=ok version={}",
            migration.version
        );
    }
    tx.commit()?;

    verify_tables(conn, latest)
}

/// Tables expected once the schema is at `version`.
pub fn tables_for_version(version: u32) -> impl Iterator<Item = &'static str> {
    MIGRATIONS
        .iter()
        .filter(move |migration| migration.version <= version)
        .flat_map(|migration| migration.tables.iter().copied())
}

fn verify_tables(conn: &Connection, version: u32) -> DbResult<()> {
    for table in tables_for_version(version) {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            error!(
                "event=db_migrate module=db status=error version={} error_code=missing_table table={}",
                version, table
            );
            return Err(DbError::MissingTable {
                table,
                db_version: version,
            });
        }
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
