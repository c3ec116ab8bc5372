//! First-match decision list.
//!
//! Rules are tried in order; the score of the first rule whose predicate
//! holds becomes the target value, otherwise the default score is used.
//! A predicate on a missing field never holds.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::evaluator::{CompileError, EvaluationError, EvaluationResult, Evaluator};
use crate::value::{FieldMap, Scalar, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub field: String,
    pub operator: Operator,
    pub value: Scalar,
    pub score: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesSpec {
    pub target: String,
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug)]
pub struct RulesModel {
    rules: Vec<Rule>,
    default: Option<String>,
    active_fields: Vec<String>,
    numeric_fields: Vec<String>,
    target_fields: Vec<String>,
}

impl RulesModel {
    pub fn new(spec: RulesSpec) -> Result<Self, CompileError> {
        if spec.target.is_empty() {
            return Err(CompileError::new("rules target is empty"));
        }
        if spec.rules.is_empty() && spec.default.is_none() {
            return Err(CompileError::new("rules model has neither rules nor a default"));
        }

        let mut active_fields: Vec<String> = Vec::new();
        let mut numeric_fields: Vec<String> = Vec::new();
        for rule in &spec.rules {
            if !active_fields.contains(&rule.field) {
                active_fields.push(rule.field.clone());
            }
            if is_numeric(&rule.value) && !numeric_fields.contains(&rule.field) {
                numeric_fields.push(rule.field.clone());
            }
        }

        Ok(Self {
            rules: spec.rules,
            default: spec.default,
            active_fields,
            numeric_fields,
            target_fields: vec![spec.target],
        })
    }

    fn matches(rule: &Rule, value: &Value) -> bool {
        let Value::Scalar(actual) = value else {
            return false;
        };
        let ordering = match (actual.as_f64(), &rule.value) {
            (Some(x), expected) if is_numeric(expected) => expected
                .as_f64()
                .and_then(|threshold| x.partial_cmp(&threshold)),
            _ => Some(actual.to_string().cmp(&rule.value.to_string())),
        };
        let Some(ordering) = ordering else {
            return false;
        };

        match rule.operator {
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessOrEqual => ordering != Ordering::Greater,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterOrEqual => ordering != Ordering::Less,
            Operator::Equal => ordering == Ordering::Equal,
            Operator::NotEqual => ordering != Ordering::Equal,
        }
    }
}

fn is_numeric(scalar: &Scalar) -> bool {
    matches!(scalar, Scalar::Integer(_) | Scalar::Float(_))
}

impl Evaluator for RulesModel {
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
        if value.is_null() || !self.numeric_fields.iter().any(|f| f == field) {
            return Ok(value);
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
        let score = self
            .rules
            .iter()
            .find(|rule| {
                arguments
                    .get(&rule.field)
                    .is_some_and(|value| Self::matches(rule, value))
            })
            .map(|rule| rule.score.clone())
            .or_else(|| self.default.clone())
            .ok_or_else(|| EvaluationError::Failed("no rule matched".to_string()))?;

        let mut result = FieldMap::new();
        result.insert(self.target_fields[0].clone(), Value::from(score));
        Ok(result)
    }
}
