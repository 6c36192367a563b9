use thiserror::Error;

/// Errors from engine configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown search algorithm '{0}' (expected 'negamax' or 'alphabeta')")]
    UnknownAlgorithm(String),
}
