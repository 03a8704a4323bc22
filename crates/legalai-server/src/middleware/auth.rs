//! Authentication middleware.
//!
//! Validates `Authorization: Bearer <token>` against the `auth_tokens`
//! table, loads the owning account and injects a [`CurrentUser`] into the
//! request extensions. When auth is disabled in config every request acts as
//! the built-in anonymous judge.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use legalai_core::{Error, Role, UserId};

use crate::context::AppContext;
use crate::error::AppError;

/// The authenticated caller, available to handlers as `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
}

impl CurrentUser {
    pub const ANONYMOUS: CurrentUser = CurrentUser {
        id: UserId::ANONYMOUS,
        role: Role::Judge,
    };

    pub fn is_judge(&self) -> bool {
        self.role == Role::Judge
    }
}

/// The raw bearer token the request was authenticated with, if any.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Option<String>);

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve a token to the account that owns it.
fn authenticate(ctx: &AppContext, token: &str) -> Result<CurrentUser, Error> {
    let conn = ctx.conn()?;
    let now = Utc::now().to_rfc3339();

    let invalid = || Error::Forbidden("Invalid or expired token".into());
    let tok = legalai_db::queries::auth::get_valid_token(&conn, token, &now)?.ok_or_else(invalid)?;
    let user =
        legalai_db::queries::users::get_user_by_id(&conn, tok.user_id)?.ok_or_else(invalid)?;

    Ok(CurrentUser {
        id: user.id,
        role: user.role,
    })
}

/// Authentication middleware. Applied to protected routes only.
pub async fn auth_middleware(
    State(ctx): State<AppContext>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !ctx.config.auth.enabled {
        request.extensions_mut().insert(CurrentUser::ANONYMOUS);
        request.extensions_mut().insert(BearerToken(None));
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())
        .ok_or_else(|| Error::Unauthorized("No token provided".into()))?
        .to_string();

    let user = authenticate(&ctx, &token)?;
    tracing::debug!(user_id = %user.id, role = %user.role, "Authenticated request");

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(BearerToken(Some(token)));
    Ok(next.run(request).await)
}

/// Role gate. Layer with `from_fn_with_state(Role::Judge, require_role)`
/// inside the auth middleware.
pub async fn require_role(
    State(required): State<Role>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .copied()
        .ok_or_else(|| Error::Unauthorized("No token provided".into()))?;

    if user.role != required {
        return Err(Error::Forbidden("Access denied".into()).into());
    }

    Ok(next.run(request).await)
}
