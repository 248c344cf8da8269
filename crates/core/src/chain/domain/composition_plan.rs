use super::composition_error::CompositionError;
use crate::shared::constants::MAX_COMBINATORIC_OPERATIONS;

/// One composition path: the operation positions to apply, in order, to a
/// fresh copy of the input signal. Steps are strictly ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    index: usize,
    steps: Vec<usize>,
}

impl Branch {
    pub fn new(index: usize, steps: Vec<usize>) -> Self {
        debug_assert!(steps.windows(2).all(|w| w[0] < w[1]));
        Self { index, steps }
    }

    /// Position of this branch's variant in the invocation output.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// True for the branch that returns the input unchanged.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The full set of branches one chain invocation runs. Variant `i` of the
/// output is produced by `branches[i]`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompositionPlan {
    branches: Vec<Branch>,
}

impl CompositionPlan {
    /// A single branch applying every operation cumulatively.
    pub fn linear(operation_count: usize) -> Self {
        Self {
            branches: vec![Branch::new(0, (0..operation_count).collect())],
        }
    }

    /// One branch per operation, each applying that operation alone.
    pub fn flat(operation_count: usize) -> Self {
        Self {
            branches: (0..operation_count)
                .map(|position| Branch::new(position, vec![position]))
                .collect(),
        }
    }

    /// Every subset of operations, enumerated by counting `mask` from 0 to
    /// 2^n - 1; bit `i` of the mask includes operation `i`.
    pub fn combinatoric(operation_count: usize) -> Result<Self, CompositionError> {
        if operation_count > MAX_COMBINATORIC_OPERATIONS {
            return Err(CompositionError::TooManyOperations {
                count: operation_count,
                max: MAX_COMBINATORIC_OPERATIONS,
            });
        }

        let branches = (0..1usize << operation_count)
            .map(|mask| {
                let steps = (0..operation_count)
                    .filter(|position| mask & (1 << position) != 0)
                    .collect();
                Branch::new(mask, steps)
            })
            .collect();

        Ok(Self { branches })
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Branch> {
        self.branches.iter()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Total number of operation calls the plan will make.
    pub fn total_steps(&self) -> usize {
        self.branches.iter().map(|b| b.steps.len()).sum()
    }
}

impl<'a> IntoIterator for &'a CompositionPlan {
    type Item = &'a Branch;
    type IntoIter = std::slice::Iter<'a, Branch>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.iter()
    }
}
