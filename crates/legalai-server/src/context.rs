//! Application context.
//!
//! [`AppContext`] is the value shared with every route handler via Axum
//! state. It is built once by the application factory, never mutated, and
//! released when the owning [`App`](crate::App) and all in-flight requests
//! are dropped.

use std::sync::Arc;

use legalai_core::config::Config;
use legalai_core::Result;
use legalai_db::pool::{DbPool, PooledConnection};

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds the pool handle and an
/// `Arc`.
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Check out a pooled database connection.
    pub fn conn(&self) -> Result<PooledConnection> {
        legalai_db::pool::get_conn(&self.db)
    }
}
