use std::sync::atomic::{AtomicBool, Ordering};

use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::chain_logger::ChainLogger;
use crate::chain::domain::branch_executor::{run_branch_guarded, BranchExecutor};
use crate::chain::domain::composition_error::CompositionError;
use crate::chain::domain::composition_plan::CompositionPlan;
use crate::shared::signal::Signal;

/// Runs branches one after another on the calling thread, stopping at the
/// first failure. A panicking operation is reported as
/// [`CompositionError::OperationPanicked`], same as the threaded executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialBranchExecutor;

impl BranchExecutor for SequentialBranchExecutor {
    fn execute(
        &self,
        operations: &[SharedOperation],
        plan: &CompositionPlan,
        signal: &Signal,
        logger: &mut dyn ChainLogger,
        cancelled: &AtomicBool,
    ) -> Result<Vec<Signal>, CompositionError> {
        let total = plan.len();
        let mut variants = Vec::with_capacity(total);

        for branch in plan {
            if cancelled.load(Ordering::Relaxed) {
                return Err(CompositionError::Cancelled);
            }
            let output = run_branch_guarded(operations, branch, signal)?;
            output.report_timings(operations, logger);
            variants.push(output.signal);
            logger.progress(variants.len(), total);
        }

        Ok(variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::chain_logger::{LogChainLogger, NullChainLogger};
    use crate::chain::test_operations::{add, counting, failing, mono, shared};
    use crate::augmentation::infrastructure::fn_operation::FnOperation;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_empty_plan_yields_nothing() {
        let variants = SequentialBranchExecutor
            .execute(
                &[],
                &CompositionPlan::flat(0),
                &mono(&[1.0]),
                &mut NullChainLogger,
                &AtomicBool::new(false),
            )
            .unwrap();
        assert!(variants.is_empty());
    }

    #[test]
    fn test_output_follows_plan_order() {
        let ops = shared(vec![add(1.0), add(10.0)]);
        let plan = CompositionPlan::combinatoric(2).unwrap();
        let variants = SequentialBranchExecutor
            .execute(
                &ops,
                &plan,
                &mono(&[0.0]),
                &mut NullChainLogger,
                &AtomicBool::new(false),
            )
            .unwrap();
        let firsts: Vec<f32> = variants.iter().map(|v| v.samples()[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0, 10.0, 11.0]);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ops = shared(vec![
            failing("first"),
            counting(calls.clone(), Duration::ZERO),
        ]);
        let err = SequentialBranchExecutor
            .execute(
                &ops,
                &CompositionPlan::flat(2),
                &mono(&[0.0]),
                &mut NullChainLogger,
                &AtomicBool::new(false),
            )
            .unwrap_err();
        assert!(matches!(err, CompositionError::Operation { position: 0, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reports_progress_and_timings() {
        let ops = shared(vec![add(1.0), add(2.0)]);
        let mut logger = LogChainLogger::new(1);
        SequentialBranchExecutor
            .execute(
                &ops,
                &CompositionPlan::combinatoric(2).unwrap(),
                &mono(&[0.0]),
                &mut logger,
                &AtomicBool::new(false),
            )
            .unwrap();
        assert_eq!(logger.completed_branches(), 4);
        // Each operation appears in two of the four subsets.
        assert_eq!(logger.timings_for("add").map(|t| t.len()), Some(4));
    }

    #[test]
    fn test_panic_becomes_error_and_stops_remaining_branches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ops = shared(vec![
            FnOperation::new("explode", |_| panic!("dsp bug")),
            counting(calls.clone(), Duration::ZERO),
        ]);
        let err = SequentialBranchExecutor
            .execute(
                &ops,
                &CompositionPlan::flat(2),
                &mono(&[0.0]),
                &mut NullChainLogger,
                &AtomicBool::new(false),
            )
            .unwrap_err();
        assert!(matches!(err, CompositionError::OperationPanicked { branch: 0, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancelled_invocation_runs_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ops = shared(vec![counting(calls.clone(), Duration::ZERO)]);
        let err = SequentialBranchExecutor
            .execute(
                &ops,
                &CompositionPlan::flat(1),
                &mono(&[0.0]),
                &mut NullChainLogger,
                &AtomicBool::new(true),
            )
            .unwrap_err();
        assert!(matches!(err, CompositionError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
