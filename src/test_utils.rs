//! Shared test utilities for execute and config tests.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::commands::Execute;
use crate::db::{ExecContext, SqliteBackend};
use crate::fixtures;
use crate::queries::SearchService;

/// Serialize tests that touch process-global state (current directory, env vars).
pub fn test_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `f` with the current directory set to `dir`, restoring it afterwards.
///
/// Callers must hold `test_lock()`.
pub fn with_current_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let old_dir = std::env::current_dir().expect("current dir should be readable");
    std::env::set_current_dir(dir).expect("should change into test dir");
    let result = f();
    std::env::set_current_dir(old_dir).expect("should restore current dir");
    result
}

/// Create an in-memory store with the schema but no rows.
pub fn empty_db() -> SqliteBackend {
    let db = SqliteBackend::in_memory().expect("in-memory store should open");
    db.execute_batch(fixtures::SQLITE_SCHEMA)
        .expect("schema should load");
    db
}

/// Create an in-memory store with the blog fixture loaded.
pub fn blog_db() -> SqliteBackend {
    let db = empty_db();
    db.execute_batch(fixtures::BLOG_SEED)
        .expect("seed should load");
    db
}

/// Execute a command against a store and return the result.
pub fn execute_cmd<C: Execute>(
    cmd: C,
    db: &SqliteBackend,
) -> Result<C::Output, Box<dyn std::error::Error>> {
    let service = SearchService::new(db)?;
    cmd.execute(&service, &ExecContext::new())
}

/// Execute a command against a store without any tables.
///
/// Used to verify commands fail with an error instead of panicking.
pub fn execute_on_bare_db<C: Execute>(cmd: C) -> Result<C::Output, Box<dyn std::error::Error>> {
    let db = SqliteBackend::in_memory().expect("in-memory store should open");
    execute_cmd(cmd, &db)
}
