//! SQLite store backed by an r2d2 connection pool.

use std::path::Path;
use std::time::{Duration, Instant};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::backend::{DatabaseBackend, ExecContext, QueryResult};
use super::value::Value;
use crate::error::{ExecutionError, MappingError};
use crate::queries::builder::compilers::sqlite::LOWER_FN;
use crate::queries::builder::CompiledQuery;

const BACKEND_NAME: &str = "Sqlite";

/// Virtual machine instructions between deadline/cancel checks.
const PROGRESS_INTERVAL: i32 = 1_000;

/// Pool settings for the SQLite store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqliteConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_max_connections() -> u32 {
    8
}

fn default_connection_timeout_ms() -> u64 {
    30_000
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            connection_timeout_ms: default_connection_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

/// SQLite store.
///
/// Every call checks a connection out of the pool and returns it when the
/// pooled handle drops, so error paths release it too.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
    is_memory: bool,
}

impl std::fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("is_memory", &self.is_memory)
            .field("pool_size", &self.pool.max_size())
            .finish()
    }
}

impl SqliteBackend {
    /// Open a file-backed database with default pool settings.
    pub fn open(path: &Path) -> Result<Self, ExecutionError> {
        Self::with_config(path, SqliteConfig::default())
    }

    pub fn with_config(path: &Path, config: SqliteConfig) -> Result<Self, ExecutionError> {
        let manager = SqliteConnectionManager::file(path);
        tracing::info!(path = %path.display(), "opening sqlite store");
        Self::build(manager, &config, false)
    }

    /// Create an in-memory database.
    ///
    /// Each SQLite memory connection is its own database, so the pool is
    /// pinned to a single long-lived connection.
    pub fn in_memory() -> Result<Self, ExecutionError> {
        let config = SqliteConfig {
            max_connections: 1,
            ..SqliteConfig::default()
        };
        Self::build(SqliteConnectionManager::memory(), &config, true)
    }

    fn build(
        manager: SqliteConnectionManager,
        config: &SqliteConfig,
        is_memory: bool,
    ) -> Result<Self, ExecutionError> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let manager = manager.with_init(move |conn: &mut Connection| {
            conn.busy_timeout(busy_timeout)?;
            register_functions(conn)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")
        });

        let mut builder = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_millis(config.connection_timeout_ms));
        if is_memory {
            builder = builder
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = builder.build(manager).map_err(|e| ExecutionError::ConnectionFailed {
            backend: BACKEND_NAME.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { pool, is_memory })
    }

    pub fn is_memory(&self) -> bool {
        self.is_memory
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, ExecutionError> {
        self.pool.get().map_err(|e| ExecutionError::ConnectionFailed {
            backend: BACKEND_NAME.to_string(),
            message: e.to_string(),
        })
    }

    /// Run a batch of statements without bound arguments.
    ///
    /// Used to prepare fixture data; searches go through `execute_query`.
    pub fn execute_batch(&self, sql: &str) -> Result<(), ExecutionError> {
        let conn = self.connection()?;
        conn.execute_batch(sql).map_err(query_failed)
    }
}

impl DatabaseBackend for SqliteBackend {
    fn execute_query(
        &self,
        query: &CompiledQuery,
        ctx: &ExecContext,
    ) -> Result<QueryResult, ExecutionError> {
        ctx.check()?;
        let conn = self.connection()?;
        let guard = InterruptGuard::install(&conn, ctx);
        let result = run_statement(&conn, query);
        drop(guard);

        result.map_err(|e| match e {
            // The progress handler aborted the statement.
            ExecutionError::QueryFailed { .. } => ctx.check().err().unwrap_or(e),
            other => other,
        })
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}

fn run_statement(conn: &Connection, query: &CompiledQuery) -> Result<QueryResult, ExecutionError> {
    let mut stmt = conn.prepare(&query.text).map_err(query_failed)?;
    let headers: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let column_count = headers.len();

    let params: Vec<&dyn ToSql> = query.arguments.iter().map(|v| v as &dyn ToSql).collect();
    let mut rows = stmt.query(params.as_slice()).map_err(query_failed)?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(query_failed)? {
        let index = out.len();
        let cells = (0..column_count)
            .map(|i| {
                let cell = row.get_ref(i).map_err(query_failed)?;
                value_from_ref(cell, index, &headers[i]).map_err(ExecutionError::from)
            })
            .collect::<Result<Vec<Value>, ExecutionError>>()?;
        out.push(cells);
    }

    Ok(QueryResult { headers, rows: out })
}

fn query_failed(e: rusqlite::Error) -> ExecutionError {
    ExecutionError::QueryFailed {
        backend: BACKEND_NAME.to_string(),
        message: e.to_string(),
    }
}

fn value_from_ref(value: ValueRef<'_>, row: usize, column: &str) -> Result<Value, MappingError> {
    let undecodable = |reason: String| MappingError::Undecodable {
        row,
        column: column.to_string(),
        reason,
    };
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| Value::Text(s.to_string()))
            .map_err(|e| undecodable(format!("invalid UTF-8 text: {}", e)))?,
        ValueRef::Blob(bytes) => {
            return Err(undecodable(format!("unsupported BLOB of {} bytes", bytes.len())));
        }
    })
}

/// Register the scalar functions compiled queries rely on.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        unicode_lower,
    )
}

/// Full Unicode lowercasing; SQLite's built-in `lower` folds ASCII only.
fn unicode_lower(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
    let text: Option<String> = ctx.get(0)?;
    Ok(text.map(|t| t.to_lowercase()))
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use rusqlite::types::Value as Sql;
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(Sql::Null),
            Value::Bool(b) => ToSqlOutput::Owned(Sql::Integer(*b as i64)),
            Value::Int(i) => ToSqlOutput::Owned(Sql::Integer(*i)),
            Value::Float(f) => ToSqlOutput::Owned(Sql::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// Installs a progress handler for the duration of one statement.
///
/// The handler is removed on drop so a pooled connection never carries a
/// stale deadline into the next call.
struct InterruptGuard<'a> {
    conn: &'a Connection,
}

impl<'a> InterruptGuard<'a> {
    fn install(conn: &'a Connection, ctx: &ExecContext) -> Self {
        let deadline = ctx.deadline();
        let cancel = ctx.cancel_flag().clone();
        conn.progress_handler(
            PROGRESS_INTERVAL,
            Some(move || {
                cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d)
            }),
        );
        Self { conn }
    }
}

impl Drop for InterruptGuard<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}
