use std::sync::Arc;

use super::combinatoric_chain::CombinatoricChain;
use super::flat_chain::FlatChain;
use super::linear_chain::LinearChain;
use super::sequential_branch_executor::SequentialBranchExecutor;
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::domain::branch_executor::BranchExecutor;
use crate::chain::domain::chain::Chain;
use crate::chain::domain::chain_strategy::ChainStrategy;

/// Creates the chain for `strategy`, running branches on the caller's thread.
pub fn create_chain(strategy: ChainStrategy, operations: Vec<SharedOperation>) -> Box<dyn Chain> {
    create_chain_with_executor(strategy, operations, Arc::new(SequentialBranchExecutor))
}

/// Creates the chain for `strategy` with a caller-chosen executor.
pub fn create_chain_with_executor(
    strategy: ChainStrategy,
    operations: Vec<SharedOperation>,
    executor: Arc<dyn BranchExecutor>,
) -> Box<dyn Chain> {
    log::debug!(
        "Creating {strategy} chain with {} operations",
        operations.len()
    );
    match strategy {
        ChainStrategy::Combinatoric => {
            Box::new(CombinatoricChain::with_executor(operations, executor))
        }
        ChainStrategy::Linear => Box::new(LinearChain::with_executor(operations, executor)),
        ChainStrategy::Flat => Box::new(FlatChain::with_executor(operations, executor)),
    }
}
