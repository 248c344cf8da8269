use std::fmt;
use std::sync::Arc;

use super::sequential_branch_executor::SequentialBranchExecutor;
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::domain::branch_executor::BranchExecutor;

/// State every concrete chain carries: the frozen operation list and the
/// executor that runs its branches.
#[derive(Clone)]
pub(crate) struct ChainParts {
    operations: Arc<[SharedOperation]>,
    executor: Arc<dyn BranchExecutor>,
}

impl ChainParts {
    pub fn new(operations: Vec<SharedOperation>, executor: Arc<dyn BranchExecutor>) -> Self {
        Self {
            operations: operations.into(),
            executor,
        }
    }

    pub fn sequential(operations: Vec<SharedOperation>) -> Self {
        Self::new(operations, Arc::new(SequentialBranchExecutor))
    }

    pub fn operations(&self) -> &[SharedOperation] {
        &self.operations
    }

    pub fn executor(&self) -> &dyn BranchExecutor {
        &*self.executor
    }

    /// Copy of these parts with `operation` appended; shares the executor.
    pub fn appended(&self, operation: SharedOperation) -> Self {
        let mut operations = self.operations.to_vec();
        operations.push(operation);
        Self::new(operations, Arc::clone(&self.executor))
    }
}

impl fmt::Debug for ChainParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.operations.iter().map(|op| op.name()))
            .finish()
    }
}
