//! Test evaluators with call accounting.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use scoring_core::evaluator::EvaluationResult;
use scoring_core::{EvaluationError, Evaluator, FieldMap, Value};

/// Echoes its prepared arguments back as the result.
pub struct EchoEvaluator {
    active: Vec<String>,
    groups: Vec<String>,
    fail_on: Option<Value>,
    calls: Arc<AtomicUsize>,
}

impl EchoEvaluator {
    pub fn new(active: &[&str]) -> Self {
        Self {
            active: active.iter().map(|s| s.to_string()).collect(),
            groups: Vec::new(),
            fail_on: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn grouped_by(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Fails any evaluation whose first active field equals `value`.
    pub fn failing_on(mut self, value: impl Into<Value>) -> Self {
        self.fail_on = Some(value.into());
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl Evaluator for EchoEvaluator {
    fn active_fields(&self) -> &[String] {
        &self.active
    }

    fn group_fields(&self) -> &[String] {
        &self.groups
    }

    fn target_fields(&self) -> &[String] {
        &[]
    }

    fn output_fields(&self) -> &[String] {
        &self.active
    }

    fn prepare(&self, _field: &str, value: Value) -> EvaluationResult<Value> {
        Ok(value)
    }

    fn evaluate(&self, arguments: &FieldMap) -> EvaluationResult<FieldMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first = self.active.first().and_then(|field| arguments.get(field));
        if self.fail_on.is_some() && first == self.fail_on.as_ref() {
            return Err(EvaluationError::Failed("rejected".to_string()));
        }
        Ok(arguments.clone())
    }
}

/// Answers every evaluation with a fixed label.
pub struct LabelEvaluator(pub &'static str);

impl Evaluator for LabelEvaluator {
    fn active_fields(&self) -> &[String] {
        &[]
    }

    fn group_fields(&self) -> &[String] {
        &[]
    }

    fn target_fields(&self) -> &[String] {
        &[]
    }

    fn output_fields(&self) -> &[String] {
        &[]
    }

    fn prepare(&self, _field: &str, value: Value) -> EvaluationResult<Value> {
        Ok(value)
    }

    fn evaluate(&self, _arguments: &FieldMap) -> EvaluationResult<FieldMap> {
        let mut result = FieldMap::new();
        result.insert("label".to_string(), Value::from(self.0));
        Ok(result)
    }
}

/// Introspection always fails.
pub struct OpaqueEvaluator;

impl Evaluator for OpaqueEvaluator {
    fn active_fields(&self) -> &[String] {
        &[]
    }

    fn group_fields(&self) -> &[String] {
        &[]
    }

    fn target_fields(&self) -> &[String] {
        &[]
    }

    fn output_fields(&self) -> &[String] {
        &[]
    }

    fn prepare(&self, _field: &str, value: Value) -> EvaluationResult<Value> {
        Ok(value)
    }

    fn evaluate(&self, _arguments: &FieldMap) -> EvaluationResult<FieldMap> {
        Ok(FieldMap::new())
    }

    fn summary(&self) -> EvaluationResult<scoring_core::ModelSummary> {
        Err(EvaluationError::Failed("schema unavailable".to_string()))
    }
}

pub fn label_of(result: &FieldMap) -> Value {
    result.get("label").cloned().unwrap_or_default()
}
