//! Axum router construction.
//!
//! Builds the full application router with all route groups, middleware
//! layers, and the OpenAPI document.

use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use legalai_core::{Error, Role};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::auth::{auth_middleware, require_role};
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "Legal AI API"),
    paths(
        routes::health::health_check,
        routes::accounts::register,
        routes::accounts::login,
        routes::accounts::logout,
        routes::accounts::me,
        routes::cases::list_cases,
        routes::cases::get_case_detail,
        routes::cases::create_case,
        routes::bail_forms::submit_bail_form,
        routes::bail_forms::list_bail_forms,
        routes::bail_forms::get_bail_form,
    ),
    components(schemas(
        routes::health::HealthResponse,
        routes::accounts::RegisterRequest,
        routes::accounts::LoginRequest,
        routes::accounts::LoginResponse,
        routes::accounts::UserData,
        routes::accounts::ProfileResponse,
        routes::accounts::MessageResponse,
        routes::cases::CaseResponse,
        legalai_core::BailFormData,
        routes::bail_forms::BailFormResponse,
        legalai_core::CaseDetails,
        legalai_core::CaseStatus,
        legalai_core::Role,
        legalai_core::Petitioner,
        legalai_core::Respondent,
        legalai_core::PoliceStation,
        legalai_core::ActSection,
        legalai_core::BailDetails,
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found() -> AppError {
    Error::not_found("Route", "no handler for this path").into()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    // Account routes that never require a token.
    let public_routes = Router::new()
        .route("/accounts/register", post(routes::accounts::register))
        .route("/accounts/login", post(routes::accounts::login));

    let judge_routes = Router::new()
        .route("/getCases", post(routes::cases::create_case))
        .route_layer(middleware::from_fn_with_state(Role::Judge, require_role));

    // Protected API routes.
    let protected_routes = Router::new()
        .route("/accounts/logout", post(routes::accounts::logout))
        .route("/accounts/me", get(routes::accounts::me))
        // Cases
        .route("/getCases/getAllCase", get(routes::cases::list_cases))
        .route("/getCases/getDetail", get(routes::cases::get_case_detail))
        // Bail forms
        .route(
            "/bailForms",
            get(routes::bail_forms::list_bail_forms).post(routes::bail_forms::submit_bail_form),
        )
        .route("/bailForms/{id}", get(routes::bail_forms::get_bail_form))
        .merge(judge_routes)
        .route_layer(middleware::from_fn_with_state(ctx.clone(), auth_middleware));

    let api = public_routes.merge(protected_routes);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", api)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(ctx.clone(), request_id_middleware))
        .layer(cors_layer(&ctx.config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
