use std::sync::atomic::AtomicBool;

use super::branch_executor::BranchExecutor;
use super::chain_strategy::ChainStrategy;
use super::composition_error::CompositionError;
use super::composition_plan::CompositionPlan;
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::chain_logger::{ChainLogger, NullChainLogger};
use crate::shared::signal::Signal;

/// Domain interface for a composition strategy over an ordered, immutable
/// list of augmentation operations.
///
/// Implementations only decide which branches to run ([`Chain::plan`]); the
/// branches themselves are run by the chain's [`BranchExecutor`].
pub trait Chain: Send + Sync {
    fn strategy(&self) -> ChainStrategy;

    /// Operations in caller-supplied order.
    fn operations(&self) -> &[SharedOperation];

    fn executor(&self) -> &dyn BranchExecutor;

    fn plan(&self) -> Result<CompositionPlan, CompositionError>;

    /// Returns a new chain of the same strategy with `operation` appended.
    /// `self` is left unchanged.
    fn with_operation(&self, operation: SharedOperation) -> Box<dyn Chain>;

    fn len(&self) -> usize {
        self.operations().len()
    }

    fn is_empty(&self) -> bool {
        self.operations().is_empty()
    }

    fn operation_names(&self) -> Vec<&str> {
        self.operations().iter().map(|op| op.name()).collect()
    }

    /// Variant count an invocation will yield, `None` if it would be refused.
    fn expected_variants(&self) -> Option<usize> {
        self.strategy().expected_variants(self.len())
    }

    fn invoke(&self, signal: &Signal) -> Result<Vec<Signal>, CompositionError> {
        self.invoke_with_logger(signal, &mut NullChainLogger)
    }

    fn invoke_with_logger(
        &self,
        signal: &Signal,
        logger: &mut dyn ChainLogger,
    ) -> Result<Vec<Signal>, CompositionError> {
        self.invoke_cancellable(signal, logger, &AtomicBool::new(false))
    }

    /// Invokes the chain, abandoning this call once `cancelled` is set.
    /// The flag only affects this invocation; other callers of the same
    /// chain or executor are untouched.
    fn invoke_cancellable(
        &self,
        signal: &Signal,
        logger: &mut dyn ChainLogger,
        cancelled: &AtomicBool,
    ) -> Result<Vec<Signal>, CompositionError> {
        let plan = self.plan()?;
        log::debug!(
            "Invoking {} chain [{}]: {} branches, {} operation calls",
            self.strategy(),
            self.operation_names().join(", "),
            plan.len(),
            plan.total_steps()
        );

        let variants = self
            .executor()
            .execute(self.operations(), &plan, signal, logger, cancelled)?;

        if variants.len() != plan.len() {
            return Err(CompositionError::MissingVariant {
                branch: variants.len(),
            });
        }

        logger.info(&format!(
            "{} chain produced {} variants",
            self.strategy(),
            variants.len()
        ));
        Ok(variants)
    }
}
