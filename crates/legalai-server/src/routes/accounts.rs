//! Account route handlers: register, login, logout, current user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{Duration, Utc};
use legalai_core::{Error, Role};
use legalai_db::models::{NewUser, User, UserProfile};
use legalai_db::queries::{auth, users};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::auth::{BearerToken, CurrentUser};
use crate::routes::ApiJson;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

const INVALID_LOGIN: &str = "You have entered an invalid email or password!";

/// Registration request payload.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub secondary_phone: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub mother_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, alias = "DOB")]
    pub dob: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub caste: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub jail: Option<String>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), Error> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::validation("First and last name are required"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::validation("A valid email is required"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }

    fn into_profile(self) -> (String, String, String, Role, UserProfile) {
        (
            self.first_name,
            self.last_name,
            self.email,
            self.role,
            UserProfile {
                address: self.address,
                phone: self.phone,
                secondary_phone: self.secondary_phone,
                father_name: self.father_name,
                mother_name: self.mother_name,
                gender: self.gender,
                dob: self.dob,
                nationality: self.nationality,
                caste: self.caste,
                occupation: self.occupation,
                jail: self.jail,
            },
        )
    }
}

/// Generic message response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Login request payload.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The account fields returned on login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserData {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub address: String,
    pub phone: String,
}

impl From<&User> for UserData {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            email: u.email.clone(),
            role: u.role,
            address: u.profile.address.clone(),
            phone: u.profile.phone.clone(),
        }
    }
}

/// Login response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_data: UserData,
    pub token: String,
    pub expires_at: String,
}

/// Full profile of the current user. Never includes the password hash.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub address: String,
    pub phone: String,
    pub secondary_phone: String,
    pub father_name: String,
    pub mother_name: String,
    pub gender: String,
    pub dob: String,
    pub nationality: String,
    pub caste: String,
    pub occupation: String,
    pub jail: Option<String>,
    pub created_at: String,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        let p = u.profile;
        Self {
            id: u.id.to_string(),
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            role: u.role,
            address: p.address,
            phone: p.phone,
            secondary_phone: p.secondary_phone,
            father_name: p.father_name,
            mother_name: p.mother_name,
            gender: p.gender,
            dob: p.dob,
            nationality: p.nationality,
            caste: p.caste,
            occupation: p.occupation,
            jail: p.jail,
            created_at: u.created_at,
        }
    }
}

/// POST /api/v1/accounts/register
#[utoipa::path(
    post,
    path = "/api/v1/accounts/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(ctx): State<AppContext>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    payload.validate()?;

    let hash = hash_password(payload.password.clone(), ctx.config.auth.bcrypt_cost).await?;
    let (first_name, last_name, email, role, profile) = payload.into_profile();

    let conn = ctx.conn()?;
    let user = users::create_user(
        &conn,
        &NewUser {
            first_name,
            last_name,
            email,
            password_hash: hash,
            role,
            profile,
        },
    )?;
    tracing::info!(user_id = %user.id, role = %user.role, "Registered new account");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User Created Successfully".into(),
        }),
    ))
}

/// POST /api/v1/accounts/login
#[utoipa::path(
    post,
    path = "/api/v1/accounts/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(ctx): State<AppContext>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = users::get_user_by_email(&*ctx.conn()?, &payload.email)?
        .ok_or_else(|| Error::InvalidCredentials("No user found!".into()))?;

    let password_valid =
        user.can_login() && verify_password(payload.password, user.password_hash.clone()).await;
    if !password_valid {
        tracing::debug!(user_id = %user.id, "Rejected login with wrong password");
        return Err(Error::InvalidCredentials(INVALID_LOGIN.into()).into());
    }

    let now = Utc::now();
    let token = uuid::Uuid::new_v4().to_string();
    let expires = i64::try_from(ctx.config.auth.session_timeout_hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| Error::Internal("auth.session_timeout_hours is out of range".into()))?;
    let expires_at = expires.to_rfc3339();

    let conn = ctx.conn()?;
    let pruned = auth::delete_expired_tokens(&conn, &now.to_rfc3339())?;
    if pruned > 0 {
        tracing::debug!(pruned, "Removed expired auth tokens");
    }
    auth::create_token(&conn, user.id, &token, &expires_at)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_data: UserData::from(&user),
        token,
        expires_at,
    }))
}

/// POST /api/v1/accounts/logout
#[utoipa::path(
    post,
    path = "/api/v1/accounts/logout",
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "No token provided")
    ),
    security(("bearer" = []))
)]
pub async fn logout(
    State(ctx): State<AppContext>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<Json<MessageResponse>, AppError> {
    if let Some(token) = token {
        let conn = ctx.conn()?;
        auth::delete_token(&conn, &token)?;
    }

    Ok(Json(MessageResponse {
        message: "Logged out".into(),
    }))
}

/// GET /api/v1/accounts/me
#[utoipa::path(
    get,
    path = "/api/v1/accounts/me",
    responses(
        (status = 200, description = "Current account", body = ProfileResponse),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid or expired token")
    ),
    security(("bearer" = []))
)]
pub async fn me(
    State(ctx): State<AppContext>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let conn = ctx.conn()?;
    let user = users::get_user_by_id(&conn, current.id)?
        .ok_or_else(|| Error::not_found("user", current.id))?;
    Ok(Json(ProfileResponse::from(user)))
}

/// Hash a password on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| Error::Internal(format!("bcrypt task failed: {e}")))?
        .map_err(|e| Error::Internal(format!("bcrypt error: {e}")))
}

/// Check a password against a stored hash on the blocking pool. Any bcrypt
/// failure counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
