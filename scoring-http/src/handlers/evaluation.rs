use axum::{
    extract::{Path, Query, State, rejection::JsonRejection},
    response::Json,
};
use scoring_core::EvaluationRequest;

use super::run_blocking;
use crate::error::AppError;
use crate::models::{EvaluationRequestBody, EvaluationResponseBody, TableParams};
use crate::server::AppState;

/// Evaluate one request
#[utoipa::path(
    post,
    path = "/api/v1/models/{id}",
    request_body = EvaluationRequestBody,
    responses(
        (status = 200, description = "Evaluation result", body = EvaluationResponseBody),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Model not found"),
        (status = 500, description = "Evaluation failed")
    ),
    params(
        ("id" = String, Path, description = "Model identifier")
    )
)]
pub async fn evaluate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EvaluationRequestBody>, JsonRejection>,
) -> Result<Json<EvaluationResponseBody>, AppError> {
    let Json(body) = payload?;
    let request: EvaluationRequest = body.into();

    let service = state.service.clone();
    let response = run_blocking(move || service.evaluate(&id, request)).await?;

    Ok(Json(response.into()))
}

/// Evaluate a batch of requests
///
/// Models with a grouping field answer with one response per group, in
/// first-seen order and without ids.
#[utoipa::path(
    post,
    path = "/api/v1/models/{id}/batch",
    request_body = Vec<EvaluationRequestBody>,
    responses(
        (status = 200, description = "Evaluation results", body = Vec<EvaluationResponseBody>),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Model not found"),
        (status = 500, description = "Evaluation failed")
    ),
    params(
        ("id" = String, Path, description = "Model identifier")
    )
)]
pub async fn evaluate_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Vec<EvaluationRequestBody>>, JsonRejection>,
) -> Result<Json<Vec<EvaluationResponseBody>>, AppError> {
    let Json(bodies) = payload?;
    let requests: Vec<EvaluationRequest> = bodies.into_iter().map(Into::into).collect();

    let service = state.service.clone();
    let responses = run_blocking(move || service.evaluate_batch(&id, &requests)).await?;

    Ok(Json(responses.into_iter().map(Into::into).collect()))
}

/// Evaluate a delimited-text table
///
/// The response table uses the delimiter detected on the request table.
#[utoipa::path(
    post,
    path = "/api/v1/models/{id}/csv",
    request_body(content = String, description = "Delimited table with a header row", content_type = "text/plain"),
    responses(
        (status = 200, description = "Result table", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed table"),
        (status = 404, description = "Model not found"),
        (status = 500, description = "Evaluation failed")
    ),
    params(
        ("id" = String, Path, description = "Model identifier"),
        TableParams
    )
)]
pub async fn evaluate_csv(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<TableParams>,
    table: String,
) -> Result<String, AppError> {
    let service = state.service.clone();
    run_blocking(move || service.evaluate_table(&id, &table, params.id_column.as_deref())).await
}
