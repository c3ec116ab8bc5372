//! Operations exposed to transports: deploy, undeploy, list, summary and
//! the three evaluation shapes (single, batch, table).

use std::sync::Arc;

use tracing::debug;

use crate::builtin::BuiltinCompiler;
use crate::dispatcher;
use crate::error::{Error, ScoringResult};
use crate::evaluator::{ModelCompiler, ModelSummary};
use crate::model_registry::{DeployedModel, ModelRegistry};
use crate::request::{EvaluationRequest, EvaluationResponse};
use crate::tabular::{self, TableFormat};

#[derive(Clone)]
pub struct ModelService {
    registry: ModelRegistry,
    compiler: Arc<dyn ModelCompiler>,
}

impl Default for ModelService {
    fn default() -> Self {
        Self::new(Arc::new(BuiltinCompiler))
    }
}

impl ModelService {
    pub fn new(compiler: Arc<dyn ModelCompiler>) -> Self {
        Self::with_registry(ModelRegistry::new(), compiler)
    }

    pub fn with_registry(registry: ModelRegistry, compiler: Arc<dyn ModelCompiler>) -> Self {
        Self { registry, compiler }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Compiles `source` and publishes it under `id`, replacing any
    /// previous model. Returns whether a model was replaced.
    #[tracing::instrument(skip(self, source), level = "debug")]
    pub fn deploy(&self, id: &str, source: &str) -> ScoringResult<bool> {
        // compile before touching the registry so readers never wait on it
        let evaluator = self.compiler.compile(source)?;
        let replaced = self.registry.deploy(DeployedModel::new(id, evaluator));
        Ok(replaced.is_some())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub fn undeploy(&self, id: &str) -> ScoringResult<()> {
        self.registry
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::ModelNotFound {
                model_id: id.to_string(),
            })
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.registry.list_ids()
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub fn summary(&self, id: &str) -> ScoringResult<ModelSummary> {
        let model = self.registry.get(id).ok_or_else(|| Error::ModelNotFound {
            model_id: id.to_string(),
        })?;
        model.evaluator().summary().map_err(Error::Introspection)
    }

    pub fn evaluate(&self, id: &str, request: EvaluationRequest) -> ScoringResult<EvaluationResponse> {
        self.evaluate_batch(id, std::slice::from_ref(&request))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::internal("evaluation produced no response"))
    }

    pub fn evaluate_batch(
        &self,
        id: &str,
        requests: &[EvaluationRequest],
    ) -> ScoringResult<Vec<EvaluationResponse>> {
        Ok(dispatcher::evaluate_batch(&self.registry, id, requests)?)
    }

    /// Decodes `text`, evaluates the rows and encodes the responses with the
    /// same delimiter. The id column is echoed only when the table has it and
    /// rows were not aggregated, since ids cannot be matched to groups.
    #[tracing::instrument(skip(self, text), fields(bytes = text.len()), level = "debug")]
    pub fn evaluate_table(
        &self,
        id: &str,
        text: &str,
        id_column: Option<&str>,
    ) -> ScoringResult<String> {
        let format = TableFormat::detect(text);
        let table = tabular::decode_table(text, format, id_column)?;
        let requests = table.requests;
        let responses = self.evaluate_batch(id, &requests)?;

        let id_column = table
            .id_column
            .as_deref()
            .filter(|_| requests.len() == responses.len());
        debug!(
            "Table evaluation: {} rows in, {} rows out",
            requests.len(),
            responses.len()
        );
        Ok(tabular::encode_table(format, id_column, &responses)?)
    }
}
