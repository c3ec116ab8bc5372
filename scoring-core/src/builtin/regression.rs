//! Linear regression: `target = intercept + Σ coefficient × field`.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::evaluator::{CompileError, EvaluationError, EvaluationResult, Evaluator};
use crate::value::{FieldMap, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionSpec {
    pub target: String,
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: IndexMap<String, f64>,
}

#[derive(Debug)]
pub struct RegressionModel {
    intercept: f64,
    coefficients: Vec<f64>,
    active_fields: Vec<String>,
    target_fields: Vec<String>,
}

impl RegressionModel {
    pub fn new(spec: RegressionSpec) -> Result<Self, CompileError> {
        if spec.target.is_empty() {
            return Err(CompileError::new("regression target is empty"));
        }
        if spec.coefficients.is_empty() {
            return Err(CompileError::new("regression has no coefficients"));
        }

        let (active_fields, coefficients) = spec.coefficients.into_iter().unzip();
        Ok(Self {
            intercept: spec.intercept,
            coefficients,
            active_fields,
            target_fields: vec![spec.target],
        })
    }
}

impl Evaluator for RegressionModel {
    fn active_fields(&self) -> &[String] {
        &self.active_fields
    }

    fn group_fields(&self) -> &[String] {
        &[]
    }

    fn target_fields(&self) -> &[String] {
        &self.target_fields
    }

    fn output_fields(&self) -> &[String] {
        &[]
    }

    fn prepare(&self, field: &str, value: Value) -> EvaluationResult<Value> {
        if value.is_null() {
            return Err(EvaluationError::MissingValue {
                field: field.to_string(),
            });
        }
        value
            .as_f64()
            .map(Value::from)
            .ok_or_else(|| EvaluationError::InvalidValue {
                field: field.to_string(),
                message: format!("expected a number, got {:?}", value.to_string()),
            })
    }

    fn evaluate(&self, arguments: &FieldMap) -> EvaluationResult<FieldMap> {
        let mut score = self.intercept;
        for (field, coefficient) in self.active_fields.iter().zip(&self.coefficients) {
            let x = arguments
                .get(field)
                .and_then(Value::as_f64)
                .ok_or_else(|| EvaluationError::MissingValue {
                    field: field.clone(),
                })?;
            score += coefficient * x;
        }

        let mut result = FieldMap::new();
        result.insert(self.target_fields[0].clone(), Value::from(score));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::evaluate_one;
    use crate::request::EvaluationRequest;

    fn model() -> RegressionModel {
        let mut coefficients = IndexMap::new();
        coefficients.insert("x1".to_string(), 2.0);
        coefficients.insert("x2".to_string(), -1.0);
        RegressionModel::new(RegressionSpec {
            target: "y".to_string(),
            intercept: 0.5,
            coefficients,
        })
        .unwrap()
    }

    #[test]
    fn test_scores_textual_numbers() {
        let request = EvaluationRequest::new(Some("r".to_string()))
            .with_argument("x1", "3")
            .with_argument("x2", 1.5)
            .with_argument("ignored", "zzz");

        let response = evaluate_one(&model(), &request).unwrap();
        assert_eq!(response.id.as_deref(), Some("r"));
        assert_eq!(response.result["y"], Value::from(5.0));
    }

    #[test]
    fn test_missing_and_invalid_inputs() {
        let missing = EvaluationRequest::new(None).with_argument("x1", "3");
        assert_eq!(
            evaluate_one(&model(), &missing).unwrap_err(),
            EvaluationError::MissingValue {
                field: "x2".to_string()
            }
        );

        let invalid = EvaluationRequest::new(None)
            .with_argument("x1", "three")
            .with_argument("x2", "1");
        assert!(matches!(
            evaluate_one(&model(), &invalid).unwrap_err(),
            EvaluationError::InvalidValue { .. }
        ));
    }
}
