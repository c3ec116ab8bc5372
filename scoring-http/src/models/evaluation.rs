use scoring_core::{EvaluationRequest, EvaluationResponse, FieldMap};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One set of named arguments
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EvaluationRequestBody {
    /// Echoed back on the response
    #[serde(default)]
    pub id: Option<String>,

    /// Field name to null, scalar or list of scalars
    #[serde(default)]
    #[schema(value_type = Object)]
    pub arguments: FieldMap,
}

impl From<EvaluationRequestBody> for EvaluationRequest {
    fn from(body: EvaluationRequestBody) -> Self {
        Self {
            id: body.id,
            arguments: body.arguments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationResponseBody {
    pub id: Option<String>,

    #[schema(value_type = Object)]
    pub result: FieldMap,
}

impl From<EvaluationResponse> for EvaluationResponseBody {
    fn from(response: EvaluationResponse) -> Self {
        Self {
            id: response.id,
            result: response.result,
        }
    }
}

/// Query parameters of table evaluation
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TableParams {
    /// Column carrying row ids; excluded from the arguments
    #[serde(rename = "idColumn")]
    pub id_column: Option<String>,
}
