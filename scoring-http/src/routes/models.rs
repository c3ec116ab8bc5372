use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{
    deploy_model, evaluate, evaluate_batch, evaluate_csv, get_model, list_models, undeploy_model,
};
use crate::server::AppState;

/// Create the model routes with state
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/models", get(list_models))
        .route(
            "/models/{id}",
            get(get_model)
                .put(deploy_model)
                .post(evaluate)
                .delete(undeploy_model),
        )
        .route("/models/{id}/batch", post(evaluate_batch))
        .route("/models/{id}/csv", post(evaluate_csv))
}
