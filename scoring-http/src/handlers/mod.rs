pub mod evaluation;
pub mod models;

// Re-export all handlers for easier imports
pub use evaluation::*;
pub use models::*;

use crate::error::AppError;

/// Runs evaluation work off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> scoring_core::ScoringResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| scoring_core::Error::internal(format!("Evaluation task failed: {}", e)))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_run_blocking_maps_service_errors() {
        let value = run_blocking(|| Ok(7)).await.unwrap();
        assert_eq!(value, 7);

        let err = run_blocking::<(), _>(|| {
            Err(scoring_core::Error::ModelNotFound {
                model_id: "m".to_string(),
            })
        })
        .await
        .unwrap_err();
        assert_eq!(err, StatusCode::NOT_FOUND);
    }
}
