//! legalai-core: shared configuration, errors, IDs, and domain types.
//!
//! This crate is the foundational dependency for the other legalai crates,
//! providing the configuration loader, a unified error type, type-safe
//! identifiers, and the legal-domain enums and form sections.

pub mod config;
pub mod error;
pub mod ids;
pub mod legal;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use legal::*;
