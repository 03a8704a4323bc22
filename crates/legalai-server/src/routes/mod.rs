//! Route handlers for the HTTP API.

pub mod accounts;
pub mod bail_forms;
pub mod cases;
pub mod health;

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json` extractor whose rejections use the API error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejections use the API error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
