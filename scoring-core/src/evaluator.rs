//! The capability boundary between the serving layer and a model engine.
//!
//! The dispatcher only ever talks to a model through [`Evaluator`], and the
//! service only ever builds one through [`ModelCompiler`]. Any engine that
//! can describe its fields and map arguments to results can be plugged in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::{FieldMap, Value};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Missing value for field {field}")]
    MissingValue { field: String },
    #[error("Invalid value for field {field}: {message}")]
    InvalidValue { field: String, message: String },
    #[error("{0}")]
    Failed(String),
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Malformed model source: {message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Field lists describing a deployed model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub active_fields: Vec<String>,
    pub group_fields: Vec<String>,
    pub target_fields: Vec<String>,
    pub output_fields: Vec<String>,
}

/// A compiled, immutable model.
pub trait Evaluator: Send + Sync {
    /// Input fields, in the order arguments are assembled.
    fn active_fields(&self) -> &[String];

    /// Fields whose value identifies rows that belong to one evaluation unit.
    fn group_fields(&self) -> &[String];

    fn target_fields(&self) -> &[String];

    fn output_fields(&self) -> &[String];

    /// Coerces and validates a raw argument before evaluation.
    fn prepare(&self, field: &str, value: Value) -> EvaluationResult<Value>;

    /// Maps prepared arguments to result fields.
    fn evaluate(&self, arguments: &FieldMap) -> EvaluationResult<FieldMap>;

    fn summary(&self) -> EvaluationResult<ModelSummary> {
        Ok(ModelSummary {
            active_fields: self.active_fields().to_vec(),
            group_fields: self.group_fields().to_vec(),
            target_fields: self.target_fields().to_vec(),
            output_fields: self.output_fields().to_vec(),
        })
    }
}

/// Turns model source text into an [`Evaluator`].
pub trait ModelCompiler: Send + Sync {
    fn compile(&self, source: &str) -> Result<Box<dyn Evaluator>, CompileError>;
}
