pub mod models;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    EvaluationRequestBody, EvaluationResponseBody, ListModelsResponse, MessageResponse,
    ModelSummaryResponse,
};
use crate::server::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::models::deploy_model,
        handlers::models::undeploy_model,
        handlers::models::list_models,
        handlers::models::get_model,
        handlers::evaluation::evaluate,
        handlers::evaluation::evaluate_batch,
        handlers::evaluation::evaluate_csv
    ),
    components(schemas(
        MessageResponse,
        ListModelsResponse,
        ModelSummaryResponse,
        EvaluationRequestBody,
        EvaluationResponseBody
    ))
)]
pub struct ApiDoc;

/// Create the main API router with state
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", api_v1_router())
}

/// Create the v1 API router with state
fn api_v1_router() -> Router<AppState> {
    Router::new().merge(models::routes())
}

/// Health check endpoint for container health monitoring
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
