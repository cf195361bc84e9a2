//! PostgreSQL store.
//!
//! Uses the synchronous `postgres` client. The client is guarded by a mutex,
//! so each call has exclusive use of the connection until it returns.

mod conversion;

use std::sync::Mutex;

use postgres::{Client, NoTls, Statement, Transaction};
use serde::{Deserialize, Serialize};

use super::backend::{DatabaseBackend, ExecContext, QueryResult};
use crate::error::{ExecutionError, MappingError};
use crate::queries::builder::CompiledQuery;

pub use conversion::{row_values, to_param, SqlParam};

const BACKEND_NAME: &str = "Postgres";

/// Connection settings for the PostgreSQL store.
///
/// Either `connection_string` or the individual fields are used; the
/// connection string wins when both are given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostgresConfig {
    #[serde(default)]
    pub connection_string: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub database: Option<String>,
}

fn default_port() -> u16 {
    5432
}

impl PostgresConfig {
    pub fn from_connection_string(url: &str) -> Self {
        Self {
            connection_string: Some(url.to_string()),
            host: None,
            port: default_port(),
            user: None,
            password: None,
            database: None,
        }
    }

    /// Render the libpq-style parameter string passed to the client.
    pub fn connection_params(&self) -> String {
        if let Some(conn) = &self.connection_string {
            return conn.clone();
        }

        let mut parts = vec![
            format!("host={}", self.host.as_deref().unwrap_or("localhost")),
            format!("port={}", self.port),
        ];
        if let Some(user) = &self.user {
            parts.push(format!("user={}", user));
        }
        if let Some(password) = &self.password {
            parts.push(format!("password={}", password));
        }
        if let Some(database) = &self.database {
            parts.push(format!("dbname={}", database));
        }
        parts.join(" ")
    }
}

/// PostgreSQL store using `$n` placeholders.
pub struct PostgresBackend {
    client: Mutex<Client>,
}

impl PostgresBackend {
    pub fn connect(config: &PostgresConfig) -> Result<Self, ExecutionError> {
        let client = Client::connect(&config.connection_params(), NoTls).map_err(|e| {
            ExecutionError::ConnectionFailed {
                backend: BACKEND_NAME.to_string(),
                message: e.to_string(),
            }
        })?;
        tracing::info!(
            host = config.host.as_deref().unwrap_or("localhost"),
            "connected to postgres store"
        );

        Ok(Self {
            client: Mutex::new(client),
        })
    }

    /// Run a batch of statements without bound arguments.
    pub fn execute_batch(&self, sql: &str) -> Result<(), ExecutionError> {
        let mut client = self.lock()?;
        client.batch_execute(sql).map_err(query_failed)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Client>, ExecutionError> {
        self.client.lock().map_err(|e| ExecutionError::ConnectionFailed {
            backend: BACKEND_NAME.to_string(),
            message: format!("client lock poisoned: {}", e),
        })
    }
}

impl DatabaseBackend for PostgresBackend {
    fn execute_query(
        &self,
        query: &CompiledQuery,
        ctx: &ExecContext,
    ) -> Result<QueryResult, ExecutionError> {
        ctx.check()?;
        let mut client = self.lock()?;

        // The deadline becomes a statement_timeout scoped to one transaction.
        let mut tx = client.transaction().map_err(query_failed)?;
        if let Some(remaining) = ctx.remaining() {
            let millis = remaining.as_millis().max(1);
            tx.batch_execute(&format!("SET LOCAL statement_timeout = {}", millis))
                .map_err(query_failed)?;
        }

        let result = run_statement(&mut tx, query).map_err(|e| match e {
            ExecutionError::QueryFailed { .. } => ctx.check().err().unwrap_or(e),
            other => other,
        })?;
        tx.commit().map_err(query_failed)?;
        Ok(result)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}

fn run_statement(
    tx: &mut Transaction<'_>,
    query: &CompiledQuery,
) -> Result<QueryResult, ExecutionError> {
    let stmt: Statement = tx.prepare(&query.text).map_err(query_failed)?;
    let headers = stmt
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let params = query
        .arguments
        .iter()
        .zip(stmt.params())
        .map(|(value, ty)| to_param(value, ty))
        .collect::<Result<Vec<SqlParam>, String>>()
        .map_err(query_failed_msg)?;
    let refs: Vec<&(dyn postgres::types::ToSql + Sync)> =
        params.iter().map(|p| p.as_ref()).collect();

    let rows = tx
        .query(&stmt, &refs)
        .map_err(query_failed)?
        .iter()
        .enumerate()
        .map(|(index, row)| row_values(row, index))
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok(QueryResult { headers, rows })
}

fn query_failed(e: postgres::Error) -> ExecutionError {
    query_failed_msg(e.to_string())
}

fn query_failed_msg(message: String) -> ExecutionError {
    ExecutionError::QueryFailed {
        backend: BACKEND_NAME.to_string(),
        message,
    }
}
