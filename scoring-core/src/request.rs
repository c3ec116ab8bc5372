use serde::{Deserialize, Serialize};

use crate::value::{FieldMap, Value};

/// A single row of input for a deployed model.
///
/// The `id` only correlates a request with its response and is never seen
/// by the evaluator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub arguments: FieldMap,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvaluationResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub result: FieldMap,
}

impl EvaluationRequest {
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            arguments: FieldMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Value under `name`, or `Null` when the field is absent.
    pub fn argument(&self, name: &str) -> Value {
        self.arguments.get(name).cloned().unwrap_or_default()
    }
}

impl EvaluationResponse {
    pub fn new(id: Option<String>, result: FieldMap) -> Self {
        Self { id, result }
    }
}
