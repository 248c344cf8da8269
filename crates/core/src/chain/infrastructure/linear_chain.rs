use std::sync::Arc;

use super::chain_parts::ChainParts;
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::domain::branch_executor::BranchExecutor;
use crate::chain::domain::chain::Chain;
use crate::chain::domain::chain_strategy::ChainStrategy;
use crate::chain::domain::composition_error::CompositionError;
use crate::chain::domain::composition_plan::CompositionPlan;

/// Applies every operation once, cumulatively, in chain order:
/// `op_n(...op_2(op_1(signal))...)`. Always yields exactly one variant.
#[derive(Clone, Debug)]
pub struct LinearChain {
    parts: ChainParts,
}

impl LinearChain {
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

impl Default for LinearChain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Chain for LinearChain {
    fn strategy(&self) -> ChainStrategy {
        ChainStrategy::Linear
    }

    fn operations(&self) -> &[SharedOperation] {
        self.parts.operations()
    }

    fn executor(&self) -> &dyn BranchExecutor {
        self.parts.executor()
    }

    fn plan(&self) -> Result<CompositionPlan, CompositionError> {
        Ok(CompositionPlan::linear(self.len()))
    }

    fn with_operation(&self, operation: SharedOperation) -> Box<dyn Chain> {
        Box::new(Self {
            parts: self.parts.appended(operation),
        })
    }
}
