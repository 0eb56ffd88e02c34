use crate::errors::EthicsError;
use chrono::Utc;
use std::fmt::{self, Debug};
use tracing::{debug, info};
use turso::{Connection, Database, Rows, Value as TursoValue};

mod forum;
mod regulations;
mod responses;
pub mod sql;
mod users;

/// A provider for interacting with the application's SQLite store using Turso.
///
/// The provider is opened once for the lifetime of the process. It holds a
/// `Database` instance, which hands out connections for each operation. When
/// cloned, it shares the same underlying database, so an in-memory store can be
/// shared between a server and its tests.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteProvider {
    /// Opens (or creates) the store at `db_path`.
    ///
    /// Use ":memory:" for a unique, isolated in-memory database.
    pub async fn new(db_path: &str) -> Result<Self, EthicsError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| EthicsError::StorageConnection(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| EthicsError::StorageConnection(e.to_string()))?;
        // Use `query` for PRAGMA statements that return a value to avoid "unexpected row" errors.
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| EthicsError::StorageConnection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Creates all five application tables if they are absent.
    ///
    /// This function is idempotent and safe to call on every application startup.
    pub async fn initialize_schema(&self) -> Result<(), EthicsError> {
        let conn = self.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| EthicsError::StorageOperationFailed(e.to_string()))?;
        }
        info!("Database schema initialized.");
        Ok(())
    }

    /// Lists the user tables currently present in the store, sorted by name.
    pub async fn table_names(&self) -> Result<Vec<String>, EthicsError> {
        let conn = self.connect()?;
        let mut rows = conn.query(sql::LIST_TABLES, ()).await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get(0)?);
        }
        Ok(names)
    }

    pub(crate) fn connect(&self) -> Result<Connection, EthicsError> {
        self.db
            .connect()
            .map_err(|e| EthicsError::StorageConnection(e.to_string()))
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

/// The creation timestamp assigned to new rows.
///
/// Millisecond precision keeps rows written in quick succession in order;
/// the format sorts lexicographically.
pub(crate) fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Reads the id produced by an `INSERT ... RETURNING id` statement.
pub(crate) async fn returned_id(mut rows: Rows) -> Result<i64, EthicsError> {
    match rows.next().await? {
        Some(row) => match row.get_value(0)? {
            TursoValue::Integer(id) => {
                debug!(id, "Row inserted.");
                Ok(id)
            }
            other => Err(EthicsError::StorageOperationFailed(format!(
                "Expected an integer id from RETURNING, got {other:?}"
            ))),
        },
        None => Err(EthicsError::StorageOperationFailed(
            "INSERT did not return the new row id".to_string(),
        )),
    }
}

/// Parses a stored enum column, reporting corrupt values as storage failures.
pub(crate) fn parse_column<T>(raw: String, column: &str) -> Result<T, EthicsError>
where
    T: std::str::FromStr,
{
    raw.parse().map_err(|_| {
        EthicsError::StorageOperationFailed(format!("Unexpected value '{raw}' in column '{column}'"))
    })
}
