//! Batch evaluation against deployed models.
//!
//! ```text
//! requests ─► resolve model ─► group fields?
//!                                ├─ none ──► evaluate each request
//!                                ├─ one ───► aggregate by key ─► evaluate each group
//!                                └─ more ──► UnsupportedModel
//! ```
//!
//! A batch is all-or-nothing: the first failing request aborts it.

use std::borrow::Cow;

use indexmap::IndexMap;
use thiserror::Error;

use crate::evaluator::{EvaluationError, Evaluator};
use crate::model_registry::ModelRegistry;
use crate::request::{EvaluationRequest, EvaluationResponse};
use crate::value::{FieldMap, Value};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Model not found: {model_id}")]
    ModelNotFound { model_id: String },
    #[error("Model {model_id} declares {group_fields} grouping fields, at most one is supported")]
    UnsupportedModel { model_id: String, group_fields: usize },
    #[error("Evaluation of request {index} failed: {source}")]
    Evaluation {
        index: usize,
        #[source]
        source: EvaluationError,
    },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Evaluates one request with the model's active fields.
///
/// Arguments the model does not declare are dropped here; declared fields
/// that are absent from the request are passed to `prepare` as `Null`.
pub fn evaluate_one(
    evaluator: &dyn Evaluator,
    request: &EvaluationRequest,
) -> Result<EvaluationResponse, EvaluationError> {
    let mut arguments = FieldMap::with_capacity(evaluator.active_fields().len());
    for field in evaluator.active_fields() {
        let value = evaluator.prepare(field, request.argument(field))?;
        arguments.insert(field.clone(), value);
    }

    let result = evaluator.evaluate(&arguments)?;

    Ok(EvaluationResponse::new(request.id.clone(), result))
}

/// Resolves `model_id` once and evaluates the whole batch against that handle.
#[tracing::instrument(skip(registry, requests), fields(requests = requests.len()), level = "debug")]
pub fn evaluate_batch(
    registry: &ModelRegistry,
    model_id: &str,
    requests: &[EvaluationRequest],
) -> DispatchResult<Vec<EvaluationResponse>> {
    let model = registry
        .get(model_id)
        .ok_or_else(|| DispatchError::ModelNotFound {
            model_id: model_id.to_string(),
        })?;
    let evaluator = model.evaluator();

    let requests = match evaluator.group_fields() {
        [] => Cow::Borrowed(requests),
        [group_field] => aggregate_requests(group_field, requests),
        fields => {
            return Err(DispatchError::UnsupportedModel {
                model_id: model_id.to_string(),
                group_fields: fields.len(),
            });
        }
    };

    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            evaluate_one(evaluator, request)
                .map_err(|source| DispatchError::Evaluation { index, source })
        })
        .collect()
}

/// Collapses requests sharing a value of `group_field` into one request per key.
///
/// Every non-key field of a synthesized request holds the list of member
/// values in encounter order, one element per member that carries the field
/// (a null or list value is kept as a single element). The key field holds
/// the key itself. Groups are emitted in first-seen order and carry no id.
/// When every key is distinct the input is returned borrowed, untouched.
pub fn aggregate_requests<'a>(
    group_field: &str,
    requests: &'a [EvaluationRequest],
) -> Cow<'a, [EvaluationRequest]> {
    let mut groups: IndexMap<Value, IndexMap<String, Vec<Value>>> = IndexMap::new();

    for request in requests {
        let columns = groups.entry(request.argument(group_field)).or_default();
        for (name, value) in &request.arguments {
            columns.entry(name.clone()).or_default().push(value.clone());
        }
    }

    if groups.len() == requests.len() {
        return Cow::Borrowed(requests);
    }

    let aggregated = groups
        .into_iter()
        .map(|(key, columns)| {
            let mut arguments: FieldMap = columns
                .into_iter()
                .map(|(name, values)| (name, Value::List(values)))
                .collect();
            arguments.insert(group_field.to_string(), key);
            EvaluationRequest {
                id: None,
                arguments,
            }
        })
        .collect();

    Cow::Owned(aggregated)
}
