use std::sync::Arc;

use super::operation_error::OperationError;
use crate::shared::signal::Signal;

/// Domain interface for a single audio augmentation (pitch shift, time
/// stretch, EQ, background noise, ...).
///
/// Implementations receive a private copy of the signal and rewrite it.
/// Parameters are fixed at construction, and identical input must yield
/// identical output for chain results to be reproducible.
pub trait AugmentationOperation: Send + Sync {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    fn apply(&self, signal: &mut Signal) -> Result<(), OperationError>;
}

/// Shared handle to an operation. Chains hold these so the same operation can
/// appear in several chains and be called from several worker threads.
pub type SharedOperation = Arc<dyn AugmentationOperation>;
