//! Database backend trait for abstracting different store implementations.
//!
//! The search pipeline only ever talks to a `&dyn DatabaseBackend`. Stores are
//! constructed by the composition layer (see `DatabaseConfig::connect`) and
//! injected; nothing in the pipeline holds a global handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::value::Value;
use crate::error::ExecutionError;
use crate::queries::builder::CompiledQuery;

/// Result of a query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trait for stores that can execute compiled queries.
///
/// Implementations must use one connection exclusively for the duration of a
/// call and release it on every exit path, including errors.
pub trait DatabaseBackend: Send + Sync {
    /// Execute a compiled query, returning raw rows.
    ///
    /// The context is honored as given: an expired deadline or a raised
    /// cancel flag must abort the call with the matching `ExecutionError`.
    fn execute_query(
        &self,
        query: &CompiledQuery,
        ctx: &ExecContext,
    ) -> Result<QueryResult, ExecutionError>;

    /// Get the backend name, used to select the query compiler.
    fn backend_name(&self) -> &'static str;
}

/// Shared cancellation token.
///
/// Clones observe the same flag, so a caller can keep one handle and pass
/// another into the execution context.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Caller-supplied execution scope: an optional deadline plus a cancel flag.
///
/// The pipeline never inspects or alters it; it is handed to the store as is.
#[derive(Debug, Clone, Default)]
pub struct ExecContext {
    deadline: Option<Instant>,
    cancel: CancelFlag,
}

impl ExecContext {
    /// A context with no deadline and a fresh cancel flag.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Fail fast if the call is already cancelled or past its deadline.
    pub fn check(&self) -> Result<(), ExecutionError> {
        if self.cancel.is_cancelled() {
            return Err(ExecutionError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(ExecutionError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}
