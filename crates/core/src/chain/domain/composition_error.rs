use thiserror::Error;

use crate::augmentation::domain::operation_error::OperationError;

/// Chain-level failure. No partial variant set is ever returned alongside it.
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error(
        "operation `{operation}` (position {position}) failed at step {step} of branch {branch}: {source}"
    )]
    Operation {
        operation: String,
        position: usize,
        branch: usize,
        step: usize,
        #[source]
        source: OperationError,
    },
    #[error("combinatoric chain has {count} operations, at most {max} are supported")]
    TooManyOperations { count: usize, max: usize },
    #[error("branch {branch} refers to operation {position}, but the chain has {len}")]
    InvalidPlan {
        branch: usize,
        position: usize,
        len: usize,
    },
    #[error("an operation in branch {branch} panicked: {message}")]
    OperationPanicked { branch: usize, message: String },
    #[error("{thread} thread panicked")]
    ThreadPanicked { thread: String },
    #[error("invocation cancelled")]
    Cancelled,
    #[error("no variant was produced for branch {branch}")]
    MissingVariant { branch: usize },
}

impl CompositionError {
    /// The operation error behind this failure, if an operation caused it.
    pub fn operation_error(&self) -> Option<&OperationError> {
        match self {
            CompositionError::Operation { source, .. } => Some(source),
            _ => None,
        }
    }
}
