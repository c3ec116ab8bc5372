//! Reference model engine.
//!
//! Models are JSON documents tagged by `kind`:
//!
//! ```json
//! { "kind": "regression", "target": "y", "intercept": 1.0, "coefficients": { "x": 2.0 } }
//! ```
//!
//! See [`regression`], [`rules`] and [`association`] for the per-kind
//! fields.

pub mod association;
pub mod regression;
pub mod rules;

use serde::Deserialize;

use crate::evaluator::{CompileError, Evaluator, ModelCompiler};

pub use association::{AssociationModel, AssociationSpec};
pub use regression::{RegressionModel, RegressionSpec};
pub use rules::{RulesModel, RulesSpec};

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ModelSource {
    Regression(RegressionSpec),
    Rules(RulesSpec),
    Association(AssociationSpec),
}

/// Compiles [`ModelSource`] documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCompiler;

impl ModelCompiler for BuiltinCompiler {
    fn compile(&self, source: &str) -> Result<Box<dyn Evaluator>, CompileError> {
        let source: ModelSource =
            serde_json::from_str(source).map_err(|e| CompileError::new(e.to_string()))?;

        Ok(match source {
            ModelSource::Regression(spec) => Box::new(RegressionModel::new(spec)?),
            ModelSource::Rules(spec) => Box::new(RulesModel::new(spec)?),
            ModelSource::Association(spec) => Box::new(AssociationModel::new(spec)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_each_kind() {
        let compiler = BuiltinCompiler;

        let model = compiler
            .compile(r#"{"kind": "regression", "target": "y", "coefficients": {"x": 1.5}}"#)
            .unwrap();
        assert_eq!(model.active_fields(), ["x".to_string()]);

        let model = compiler
            .compile(
                r#"{"kind": "rules", "target": "label", "default": "other",
                    "rules": [{"field": "x", "operator": "lessThan", "value": 1, "score": "low"}]}"#,
            )
            .unwrap();
        assert_eq!(model.target_fields(), ["label".to_string()]);

        let model = compiler
            .compile(
                r#"{"kind": "association", "groupField": "transaction", "itemField": "item",
                    "rules": [{"antecedent": ["bread"], "consequent": "butter"}]}"#,
            )
            .unwrap();
        assert_eq!(model.group_fields(), ["transaction".to_string()]);
    }

    #[test]
    fn test_compile_rejects_malformed_source() {
        assert!(BuiltinCompiler.compile("<PMML/>").is_err());
        assert!(BuiltinCompiler.compile(r#"{"kind": "neuralNetwork"}"#).is_err());
        assert!(
            BuiltinCompiler
                .compile(r#"{"kind": "regression", "target": "y", "coefficients": {}}"#)
                .is_err()
        );
    }
}
