//! legalai-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, typed models, and query modules for accounts,
//! auth tokens, court cases, and bail forms.
//!
//! # Example
//!
//! ```
//! use legalai_db::pool::{init_memory_pool, get_conn};
//! use legalai_db::queries::cases;
//!
//! let pool = init_memory_pool().unwrap();
//! let conn = get_conn(&pool).unwrap();
//! let all = cases::list_cases(&conn, &cases::CaseFilter::default()).unwrap();
//! assert!(all.is_empty());
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
