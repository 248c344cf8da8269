use std::sync::Arc;

use super::chain_parts::ChainParts;
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::domain::branch_executor::BranchExecutor;
use crate::chain::domain::chain::Chain;
use crate::chain::domain::chain_strategy::ChainStrategy;
use crate::chain::domain::composition_error::CompositionError;
use crate::chain::domain::composition_plan::CompositionPlan;

/// Expands a signal into every subset of the chain's operations.
///
/// Yields 2^n variants. Each subset is applied in chain order (never in
/// subset order) to its own copy of the input, and variant 0 is always the
/// untouched input. Subsets are enumerated by counting a bit mask upward,
/// so variant `m` contains operation `i` iff bit `i` of `m` is set.
#[derive(Clone, Debug)]
pub struct CombinatoricChain {
    parts: ChainParts,
}

impl CombinatoricChain {
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

impl Default for CombinatoricChain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Chain for CombinatoricChain {
    fn strategy(&self) -> ChainStrategy {
        ChainStrategy::Combinatoric
    }

    fn operations(&self) -> &[SharedOperation] {
        self.parts.operations()
    }

    fn executor(&self) -> &dyn BranchExecutor {
        self.parts.executor()
    }

    fn plan(&self) -> Result<CompositionPlan, CompositionError> {
        CompositionPlan::combinatoric(self.len())
    }

    fn with_operation(&self, operation: SharedOperation) -> Box<dyn Chain> {
        Box::new(Self {
            parts: self.parts.appended(operation),
        })
    }
}
