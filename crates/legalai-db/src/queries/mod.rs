//! Database query modules.

pub mod auth;
pub mod bail_forms;
pub mod cases;
pub mod users;
