//! Market-basket recommendations over grouped rows.
//!
//! Rows sharing a `groupField` value form one basket; the dispatcher folds
//! their `itemField` values into a list before the model sees them. A rule
//! fires when its whole antecedent is in the basket and its consequent is not.

use serde::Deserialize;

use crate::evaluator::{CompileError, EvaluationResult, Evaluator};
use crate::value::{FieldMap, Scalar, Value};

fn default_output() -> String {
    "recommendations".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSpec {
    pub group_field: String,
    pub item_field: String,
    #[serde(default = "default_output")]
    pub output: String,
    pub rules: Vec<AssociationRule>,
}

#[derive(Debug)]
pub struct AssociationModel {
    rules: Vec<AssociationRule>,
    active_fields: Vec<String>,
    group_fields: Vec<String>,
    output_fields: Vec<String>,
}

impl AssociationModel {
    pub fn new(spec: AssociationSpec) -> Result<Self, CompileError> {
        if spec.group_field.is_empty() || spec.item_field.is_empty() {
            return Err(CompileError::new("association model needs groupField and itemField"));
        }
        if spec.group_field == spec.item_field {
            return Err(CompileError::new("groupField and itemField must differ"));
        }

        Ok(Self {
            rules: spec.rules,
            active_fields: vec![spec.group_field.clone(), spec.item_field],
            group_fields: vec![spec.group_field],
            output_fields: vec![spec.output],
        })
    }

    fn group_field(&self) -> &str {
        &self.group_fields[0]
    }

    fn item_field(&self) -> &str {
        &self.active_fields[1]
    }
}

impl Evaluator for AssociationModel {
    fn active_fields(&self) -> &[String] {
        &self.active_fields
    }

    fn group_fields(&self) -> &[String] {
        &self.group_fields
    }

    fn target_fields(&self) -> &[String] {
        &[]
    }

    fn output_fields(&self) -> &[String] {
        &self.output_fields
    }

    fn prepare(&self, _field: &str, value: Value) -> EvaluationResult<Value> {
        Ok(value)
    }

    fn evaluate(&self, arguments: &FieldMap) -> EvaluationResult<FieldMap> {
        let basket: Vec<String> = arguments
            .get(self.item_field())
            .map(|items| items.scalars().into_iter().map(Scalar::to_string).collect())
            .unwrap_or_default();

        let mut recommendations: Vec<Scalar> = Vec::new();
        for rule in &self.rules {
            let fires = rule.antecedent.iter().all(|item| basket.contains(item))
                && !basket.contains(&rule.consequent);
            let consequent = Scalar::String(rule.consequent.clone());
            if fires && !recommendations.contains(&consequent) {
                recommendations.push(consequent);
            }
        }

        let mut result = FieldMap::new();
        result.insert(
            self.group_field().to_string(),
            arguments.get(self.group_field()).cloned().unwrap_or_default(),
        );
        result.insert(self.output_fields[0].clone(), Value::from(recommendations));
        Ok(result)
    }
}
