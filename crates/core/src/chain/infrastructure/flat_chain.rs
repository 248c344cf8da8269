use std::sync::Arc;

use super::chain_parts::ChainParts;
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::domain::branch_executor::BranchExecutor;
use crate::chain::domain::chain::Chain;
use crate::chain::domain::chain_strategy::ChainStrategy;
use crate::chain::domain::composition_error::CompositionError;
use crate::chain::domain::composition_plan::CompositionPlan;

/// Applies each operation on its own to the original signal.
///
/// Yields one variant per operation, in chain order. Unlike the other
/// strategies there is no baseline variant, so an empty chain yields nothing.
#[derive(Clone, Debug)]
pub struct FlatChain {
    parts: ChainParts,
}

impl FlatChain {
    pub fn new(operations: Vec<SharedOperation>) -> Self {
        Self {
            parts: ChainParts::sequential(operations),
        }
    }

    pub fn with_executor(
        operations: Vec<SharedOperation>,
        executor: Arc<dyn BranchExecutor>,
    ) -> Self {
        Self {
            parts: ChainParts::new(operations, executor),
        }
    }
}

impl Default for FlatChain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Chain for FlatChain {
    fn strategy(&self) -> ChainStrategy {
        ChainStrategy::Flat
    }

    fn operations(&self) -> &[SharedOperation] {
        self.parts.operations()
    }

    fn executor(&self) -> &dyn BranchExecutor {
        self.parts.executor()
    }

    fn plan(&self) -> Result<CompositionPlan, CompositionError> {
        Ok(CompositionPlan::flat(self.len()))
    }

    fn with_operation(&self, operation: SharedOperation) -> Box<dyn Chain> {
        Box::new(Self {
            parts: self.parts.appended(operation),
        })
    }
}
