//! # scoring-core: model-serving dispatch layer
//!
//! Holds a set of named, independently deployable models and answers
//! evaluation requests against them.
//!
//! ## Components
//!
//! - Values ([`value`]): the closed `Null | Scalar | List` variant carried by
//!   every request and response field.
//! - Evaluator capability ([`evaluator`]): the narrow interface a model
//!   engine implements. The reference engine lives in [`builtin`].
//! - Model registry ([`model_registry`]): concurrent id → model map with
//!   atomic publish on deploy and removal that never invalidates handles
//!   already in use.
//! - Dispatcher ([`dispatcher`]): batch evaluation, including the group-by
//!   aggregation applied to models that declare a grouping field.
//! - Tabular adapter ([`tabular`]): delimited text in, delimited text out.
//! - Service ([`service`]): the operations a transport exposes.
//!
//! ## Evaluation Flow
//!
//! ```text
//! table text ─► tabular::decode_table ─┐
//!                                      ▼
//! requests ─────────────────► dispatcher::evaluate_batch ─► registry.get(id)
//!                                      │                      (once per call)
//!                                      ▼
//!                            Evaluator::prepare / evaluate
//!                                      │
//! responses ◄──────────────────────────┤
//!                                      ▼
//! table text ◄─ tabular::encode_table ─┘
//! ```

pub mod builtin;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod model_registry;
pub mod request;
pub mod service;
pub mod tabular;
pub mod value;

// Re-exports
pub use error::*;
pub use evaluator::{CompileError, EvaluationError, Evaluator, ModelCompiler, ModelSummary};
pub use model_registry::{DeployedModel, ModelRegistry};
pub use request::{EvaluationRequest, EvaluationResponse};
pub use service::ModelService;
pub use value::{FieldMap, Scalar, Value};
