use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use crate::error::AppError;
use crate::models::{ListModelsResponse, MessageResponse, ModelSummaryResponse};
use crate::server::AppState;

/// Deploy model
///
/// Compiles the request body and publishes it under `id`, replacing any
/// model already deployed there.
#[utoipa::path(
    put,
    path = "/api/v1/models/{id}",
    request_body(content = String, description = "Model source", content_type = "text/plain"),
    responses(
        (status = 200, description = "Model deployed", body = MessageResponse),
        (status = 400, description = "Malformed model source"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = String, Path, description = "Model identifier")
    )
)]
pub async fn deploy_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    source: String,
) -> Result<Json<MessageResponse>, AppError> {
    let replaced = state.service.deploy(&id, &source)?;
    let message = if replaced {
        format!("Model {} redeployed", id)
    } else {
        format!("Model {} deployed", id)
    };
    info!("{}", message);
    Ok(Json(MessageResponse::new(message)))
}

/// Undeploy model
#[utoipa::path(
    delete,
    path = "/api/v1/models/{id}",
    responses(
        (status = 200, description = "Model undeployed", body = MessageResponse),
        (status = 404, description = "Model not found")
    ),
    params(
        ("id" = String, Path, description = "Model identifier")
    )
)]
pub async fn undeploy_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.service.undeploy(&id)?;
    Ok(Json(MessageResponse::new(format!("Model {} undeployed", id))))
}

/// List models
#[utoipa::path(
    get,
    path = "/api/v1/models",
    responses(
        (status = 200, description = "Deployed model ids", body = ListModelsResponse)
    )
)]
pub async fn list_models(State(state): State<AppState>) -> Json<ListModelsResponse> {
    Json(ListModelsResponse {
        ids: state.service.list_ids(),
    })
}

/// Get model summary
///
/// Returns the active, group, target and output fields of a model.
#[utoipa::path(
    get,
    path = "/api/v1/models/{id}",
    responses(
        (status = 200, description = "Model summary", body = ModelSummaryResponse),
        (status = 404, description = "Model not found"),
        (status = 500, description = "Model could not be introspected")
    ),
    params(
        ("id" = String, Path, description = "Model identifier")
    )
)]
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModelSummaryResponse>, AppError> {
    let summary = state.service.summary(&id)?;
    Ok(Json(summary.into()))
}
