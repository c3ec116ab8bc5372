use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::info;

use crate::evaluator::Evaluator;

/// An evaluator published under an id.
///
/// Entries are never mutated after deploy; a redeploy publishes a new entry
/// and holders of the old `Arc` keep using it until they drop it.
pub struct DeployedModel {
    id: String,
    evaluator: Box<dyn Evaluator>,
    deployed_at: DateTime<Utc>,
}

impl DeployedModel {
    pub fn new(id: impl Into<String>, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            id: id.into(),
            evaluator,
            deployed_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    pub fn deployed_at(&self) -> DateTime<Utc> {
        self.deployed_at
    }
}

impl fmt::Debug for DeployedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployedModel")
            .field("id", &self.id)
            .field("deployed_at", &self.deployed_at)
            .finish_non_exhaustive()
    }
}

/// Concurrent id → model map.
///
/// Each key is swapped under its shard lock only, so lookups never wait for
/// a model to be compiled and deploys of unrelated ids do not contend on a
/// single lock.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: Arc<DashMap<String, Arc<DeployedModel>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `model`, returning the entry it replaced.
    #[tracing::instrument(skip(self, model), fields(model_id = %model.id()), level = "debug")]
    pub fn deploy(&self, model: DeployedModel) -> Option<Arc<DeployedModel>> {
        let id = model.id().to_string();
        let replaced = self.models.insert(id.clone(), Arc::new(model));
        if replaced.is_some() {
            info!("Model {} replaced", id);
        } else {
            info!("Model {} deployed", id);
        }
        replaced
    }

    pub fn get(&self, id: &str) -> Option<Arc<DeployedModel>> {
        self.models.get(id).map(|entry| entry.value().clone())
    }

    #[tracing::instrument(skip(self), level = "debug")]
    pub fn remove(&self, id: &str) -> Option<Arc<DeployedModel>> {
        let removed = self.models.remove(id).map(|(_, model)| model);
        if removed.is_some() {
            info!("Model {} undeployed", id);
        }
        removed
    }

    /// Sorted snapshot of the deployed ids.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.models.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
