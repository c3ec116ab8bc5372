use thiserror::Error;

use crate::dispatcher::DispatchError;
use crate::evaluator::{CompileError, EvaluationError};
use crate::tabular::TableError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Model not found: {model_id}")]
    ModelNotFound { model_id: String },
    #[error("{0}")]
    Compile(#[from] CompileError),
    #[error("{0}")]
    Table(#[from] TableError),
    #[error("{0}")]
    Dispatch(#[from] DispatchError),
    #[error("Model introspection failed: {0}")]
    Introspection(EvaluationError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ScoringResult<T> = Result<T, Error>;

/// Coarse classification for callers that map errors onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MalformedInput,
    UnsupportedModel,
    EvaluationFailed,
    Internal,
}

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ModelNotFound { .. } => ErrorKind::NotFound,
            Error::Dispatch(DispatchError::ModelNotFound { .. }) => ErrorKind::NotFound,
            Error::Dispatch(DispatchError::UnsupportedModel { .. }) => ErrorKind::UnsupportedModel,
            Error::Dispatch(DispatchError::Evaluation { .. }) => ErrorKind::EvaluationFailed,
            Error::Compile(_) => ErrorKind::MalformedInput,
            Error::Table(TableError::Encoding(_)) => ErrorKind::Internal,
            Error::Table(_) => ErrorKind::MalformedInput,
            Error::Introspection(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err: Error = DispatchError::ModelNotFound {
            model_id: "m".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Model not found: m");

        let err: Error = CompileError::new("bad").into();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(err.to_string(), "Malformed model source: bad");

        let err: Error = TableError::MissingHeader.into();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let err: Error = DispatchError::UnsupportedModel {
            model_id: "m".to_string(),
            group_fields: 2,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedModel);
    }
}
