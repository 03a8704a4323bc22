//! Bail application route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use legalai_core::{BailFormData, BailFormId, Error};
use legalai_db::models::BailForm;
use legalai_db::queries::bail_forms;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::routes::ApiJson;

/// Stored bail application.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BailFormResponse {
    pub id: String,
    pub submitted_by: String,
    #[serde(flatten)]
    pub data: BailFormData,
    pub created_at: String,
}

impl From<BailForm> for BailFormResponse {
    fn from(form: BailForm) -> Self {
        Self {
            id: form.id.to_string(),
            submitted_by: form.submitted_by.to_string(),
            data: form.data,
            created_at: form.created_at,
        }
    }
}

/// POST /api/v1/bailForms
#[utoipa::path(
    post,
    path = "/api/v1/bailForms",
    request_body = BailFormData,
    responses(
        (status = 201, description = "Bail form stored", body = BailFormResponse),
        (status = 400, description = "Petitioner name missing")
    ),
    security(("bearer" = []))
)]
pub async fn submit_bail_form(
    State(ctx): State<AppContext>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(payload): ApiJson<BailFormData>,
) -> Result<(StatusCode, Json<BailFormResponse>), AppError> {
    if payload.petitioner.name.trim().is_empty() {
        return Err(Error::validation("Petitioner name is required").into());
    }

    let conn = ctx.conn()?;
    let form = bail_forms::create_bail_form(&conn, user.id, &payload)?;
    tracing::info!(form_id = %form.id, user_id = %user.id, "Stored bail form");

    Ok((StatusCode::CREATED, Json(BailFormResponse::from(form))))
}

/// GET /api/v1/bailForms
#[utoipa::path(
    get,
    path = "/api/v1/bailForms",
    responses(
        (status = 200, description = "All forms for judges, own forms otherwise", body = Vec<BailFormResponse>)
    ),
    security(("bearer" = []))
)]
pub async fn list_bail_forms(
    State(ctx): State<AppContext>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<BailFormResponse>>, AppError> {
    let owner = (!user.is_judge()).then_some(user.id);
    let conn = ctx.conn()?;
    let forms = bail_forms::list_bail_forms(&conn, owner)?;
    Ok(Json(forms.into_iter().map(BailFormResponse::from).collect()))
}

/// GET /api/v1/bailForms/{id}
#[utoipa::path(
    get,
    path = "/api/v1/bailForms/{id}",
    params(("id" = String, Path, description = "Bail form ID")),
    responses(
        (status = 200, description = "Bail form", body = BailFormResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not found or not visible to the caller")
    ),
    security(("bearer" = []))
)]
pub async fn get_bail_form(
    State(ctx): State<AppContext>,
    Extension(user): Extension<CurrentUser>,
    Path(raw): Path<String>,
) -> Result<Json<BailFormResponse>, AppError> {
    let id: BailFormId = raw
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid bail form id: {raw}")))?;

    let conn = ctx.conn()?;
    let form = bail_forms::get_bail_form(&conn, id)?
        .filter(|f| user.is_judge() || f.submitted_by == user.id)
        .ok_or_else(|| Error::not_found("Bail form", id))?;

    Ok(Json(BailFormResponse::from(form)))
}
