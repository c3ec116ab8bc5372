use scoring_core::ModelSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a deploy or undeploy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListModelsResponse {
    /// Deployed model ids, sorted
    pub ids: Vec<String>,
}

/// Field lists of a deployed model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummaryResponse {
    /// Fields read from each request
    pub active_fields: Vec<String>,

    /// Fields that group rows into one evaluation unit
    pub group_fields: Vec<String>,

    pub target_fields: Vec<String>,

    pub output_fields: Vec<String>,
}

impl From<ModelSummary> for ModelSummaryResponse {
    fn from(summary: ModelSummary) -> Self {
        Self {
            active_fields: summary.active_fields,
            group_fields: summary.group_fields,
            target_fields: summary.target_fields,
            output_fields: summary.output_fields,
        }
    }
}
