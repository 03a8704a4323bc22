//! Court case route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use legalai_core::{CaseDetails, CaseId, CaseStatus, Error};
use legalai_db::models::CourtCase;
use legalai_db::queries::cases::{self, CaseFilter};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::{ApiJson, ApiQuery};

/// Largest page a client may request.
const MAX_PAGE: u32 = 500;

/// Court case response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseResponse {
    pub id: String,
    #[serde(flatten)]
    pub details: CaseDetails,
    pub created_at: String,
}

impl From<CourtCase> for CaseResponse {
    fn from(case: CourtCase) -> Self {
        Self {
            id: case.id.to_string(),
            details: case.details,
            created_at: case.created_at,
        }
    }
}

/// Query parameters for the case list.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCasesQuery {
    /// `Open`, `Closed` or `In Progress`.
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Query parameters for a case lookup.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CaseDetailQuery {
    pub id: Option<String>,
}

/// GET /api/v1/getCases/getAllCase
#[utoipa::path(
    get,
    path = "/api/v1/getCases/getAllCase",
    params(ListCasesQuery),
    responses(
        (status = 200, description = "Cases, newest first", body = Vec<CaseResponse>),
        (status = 401, description = "No token provided")
    ),
    security(("bearer" = []))
)]
pub async fn list_cases(
    State(ctx): State<AppContext>,
    ApiQuery(query): ApiQuery<ListCasesQuery>,
) -> Result<Json<Vec<CaseResponse>>, AppError> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<CaseStatus>)
        .transpose()?;

    let filter = CaseFilter {
        status,
        limit: query.limit.map(|l| l.min(MAX_PAGE)),
        offset: query.offset,
    };

    let conn = ctx.conn()?;
    let all = cases::list_cases(&conn, &filter)?;
    Ok(Json(all.into_iter().map(CaseResponse::from).collect()))
}

/// GET /api/v1/getCases/getDetail?id=
#[utoipa::path(
    get,
    path = "/api/v1/getCases/getDetail",
    params(CaseDetailQuery),
    responses(
        (status = 200, description = "Case found", body = CaseResponse),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, description = "Case not found")
    ),
    security(("bearer" = []))
)]
pub async fn get_case_detail(
    State(ctx): State<AppContext>,
    ApiQuery(query): ApiQuery<CaseDetailQuery>,
) -> Result<Json<CaseResponse>, AppError> {
    let raw = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::validation("Query parameter 'id' is required"))?;
    let id: CaseId = raw
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid case id: {raw}")))?;

    let conn = ctx.conn()?;
    let case = cases::get_case(&conn, id)?.ok_or_else(|| Error::not_found("Case", id))?;
    Ok(Json(CaseResponse::from(case)))
}

/// POST /api/v1/getCases
#[utoipa::path(
    post,
    path = "/api/v1/getCases",
    request_body = CaseDetails,
    responses(
        (status = 201, description = "Case created", body = CaseResponse),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Caller is not a judge")
    ),
    security(("bearer" = []))
)]
pub async fn create_case(
    State(ctx): State<AppContext>,
    ApiJson(details): ApiJson<CaseDetails>,
) -> Result<(StatusCode, Json<CaseResponse>), AppError> {
    details.validate()?;

    let conn = ctx.conn()?;
    let case = cases::create_case(&conn, &details)?;
    tracing::info!(case_id = %case.id, case_number = %case.details.case_number, "Created court case");

    Ok((StatusCode::CREATED, Json(CaseResponse::from(case))))
}
