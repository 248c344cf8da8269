use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use super::composition_error::CompositionError;
use super::composition_plan::{Branch, CompositionPlan};
use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::chain_logger::ChainLogger;
use crate::shared::signal::Signal;

/// Abstracts how the branches of a composition plan are run.
///
/// Infrastructure provides concrete implementations (sequential, threaded).
/// Every implementation must return variant `i` for `plan.branches()[i]`
/// and must return no variants at all if any branch fails or panics.
///
/// `cancelled` belongs to this one invocation: once it is set, no further
/// branches start and the call returns [`CompositionError::Cancelled`].
/// Executors hold no per-invocation state, so one executor may serve many
/// chains and callers at once.
pub trait BranchExecutor: Send + Sync {
    fn execute(
        &self,
        operations: &[SharedOperation],
        plan: &CompositionPlan,
        signal: &Signal,
        logger: &mut dyn ChainLogger,
        cancelled: &AtomicBool,
    ) -> Result<Vec<Signal>, CompositionError>;
}

/// Wall-clock cost of one operation call inside a branch.
#[derive(Clone, Copy, Debug)]
pub struct OperationTiming {
    pub position: usize,
    pub duration_ms: f64,
}

/// The variant produced by one branch, plus how long each step took.
#[derive(Debug)]
pub struct BranchOutput {
    pub index: usize,
    pub signal: Signal,
    pub timings: Vec<OperationTiming>,
}

impl BranchOutput {
    /// Forwards the step timings to `logger` under each operation's name.
    pub fn report_timings(&self, operations: &[SharedOperation], logger: &mut dyn ChainLogger) {
        for timing in &self.timings {
            if let Some(operation) = operations.get(timing.position) {
                logger.timing(operation.name(), timing.duration_ms);
            }
        }
    }
}

/// Applies the branch's operations, in step order, to a copy of `original`.
pub fn run_branch(
    operations: &[SharedOperation],
    branch: &Branch,
    original: &Signal,
) -> Result<BranchOutput, CompositionError> {
    let mut signal = original.clone();
    let mut timings = Vec::with_capacity(branch.steps().len());

    for (step, &position) in branch.steps().iter().enumerate() {
        let operation = operations
            .get(position)
            .ok_or(CompositionError::InvalidPlan {
                branch: branch.index(),
                position,
                len: operations.len(),
            })?;

        let started = Instant::now();
        operation
            .apply(&mut signal)
            .map_err(|source| CompositionError::Operation {
                operation: operation.name().to_string(),
                position,
                branch: branch.index(),
                step,
                source,
            })?;
        timings.push(OperationTiming {
            position,
            duration_ms: started.elapsed().as_secs_f64() * 1000.0,
        });
    }

    Ok(BranchOutput {
        index: branch.index(),
        signal,
        timings,
    })
}

/// Runs the branch like [`run_branch`], turning a panicking operation into
/// [`CompositionError::OperationPanicked`] so executors can fail fast.
pub fn run_branch_guarded(
    operations: &[SharedOperation],
    branch: &Branch,
    original: &Signal,
) -> Result<BranchOutput, CompositionError> {
    panic::catch_unwind(AssertUnwindSafe(|| run_branch(operations, branch, original)))
        .unwrap_or_else(|payload| {
            Err(CompositionError::OperationPanicked {
                branch: branch.index(),
                message: panic_message(payload.as_ref()),
            })
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augmentation::domain::operation_error::OperationError;
    use crate::chain::chain_logger::LogChainLogger;
    use crate::augmentation::infrastructure::fn_operation::FnOperation;
    use crate::chain::test_operations::{add, failing, mono, scale, shared};
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_branch_returns_copy_of_input() {
        let original = mono(&[0.1, 0.2, 0.3]);
        let output = run_branch(&[], &Branch::new(0, vec![]), &original).unwrap();
        assert_eq!(output.signal, original);
        assert!(output.timings.is_empty());
    }

    #[test]
    fn test_steps_applied_in_order() {
        let ops = shared(vec![add(1.0), scale(2.0)]);
        let output = run_branch(&ops, &Branch::new(3, vec![0, 1]), &mono(&[1.0])).unwrap();
        // (1 + 1) * 2, not 1 * 2 + 1
        assert_relative_eq!(output.signal.samples()[0], 4.0);
        assert_eq!(output.index, 3);
        assert_eq!(output.timings.len(), 2);
        assert_eq!(output.timings[1].position, 1);
    }

    #[test]
    fn test_original_is_untouched() {
        let ops = shared(vec![add(1.0)]);
        let original = mono(&[0.0, 0.0]);
        run_branch(&ops, &Branch::new(0, vec![0]), &original).unwrap();
        assert_eq!(original.samples(), &[0.0, 0.0]);
    }

    #[test]
    fn test_failure_identifies_operation_branch_and_step() {
        let ops = shared(vec![add(1.0), failing("broken")]);
        let err = run_branch(&ops, &Branch::new(3, vec![0, 1]), &mono(&[0.0])).unwrap_err();
        match err {
            CompositionError::Operation {
                operation,
                position,
                branch,
                step,
                source,
            } => {
                assert_eq!(operation, "broken");
                assert_eq!(position, 1);
                assert_eq!(branch, 3);
                assert_eq!(step, 1);
                assert_eq!(source, OperationError::failed("broken rejected input"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_position_is_invalid_plan() {
        let ops = shared(vec![add(1.0)]);
        let err = run_branch(&ops, &Branch::new(0, vec![0, 4]), &mono(&[0.0])).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::InvalidPlan {
                branch: 0,
                position: 4,
                len: 1
            }
        ));
    }

    #[test]
    fn test_report_timings_uses_operation_names() {
        let ops = shared(vec![add(1.0), scale(3.0)]);
        let output = run_branch(&ops, &Branch::new(0, vec![0, 1]), &mono(&[1.0])).unwrap();
        let mut logger = LogChainLogger::new(1);
        output.report_timings(&ops, &mut logger);
        assert_eq!(logger.timings_for("add").map(|t| t.len()), Some(1));
        assert_eq!(logger.timings_for("scale").map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_guarded_run_converts_panic_to_error() {
        let ops = shared(vec![
            add(1.0),
            FnOperation::new("explode", |_| panic!("dsp bug")),
        ]);
        let err =
            run_branch_guarded(&ops, &Branch::new(2, vec![0, 1]), &mono(&[0.0])).unwrap_err();
        match err {
            CompositionError::OperationPanicked { branch, message } => {
                assert_eq!(branch, 2);
                assert_eq!(message, "dsp bug");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_guarded_run_keeps_formatted_panic_message() {
        let ops = shared(vec![FnOperation::new("explode", |signal: &mut Signal| {
            panic!("bad rate {}", signal.sample_rate())
        })]);
        let err =
            run_branch_guarded(&ops, &Branch::new(0, vec![0]), &mono(&[0.0])).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::OperationPanicked { ref message, .. } if message == "bad rate 16000"
        ));
    }

    #[test]
    fn test_guarded_run_passes_through_success() {
        let ops = shared(vec![add(1.0)]);
        let output = run_branch_guarded(&ops, &Branch::new(0, vec![0]), &mono(&[1.0])).unwrap();
        assert_relative_eq!(output.signal.samples()[0], 2.0);
    }
}
