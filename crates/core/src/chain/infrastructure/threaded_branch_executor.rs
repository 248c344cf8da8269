use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{Scope, ScopedJoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::augmentation::domain::augmentation_operation::SharedOperation;
use crate::chain::chain_logger::ChainLogger;
use crate::chain::domain::branch_executor::{run_branch_guarded, BranchExecutor, BranchOutput};
use crate::chain::domain::composition_error::CompositionError;
use crate::chain::domain::composition_plan::{Branch, CompositionPlan};
use crate::shared::constants::{DEFAULT_CHANNEL_CAPACITY, FALLBACK_WORKER_COUNT};
use crate::shared::signal::Signal;

type BranchResult = Result<BranchOutput, CompositionError>;

/// Configuration for the threaded executor. Cancellation is per invocation
/// and is passed to `execute`, not stored here.
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Upper bound on worker threads; never more than the branch count.
    pub max_workers: usize,
    pub channel_capacity: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_WORKER_COUNT),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Runs branches on a bounded worker pool.
///
/// Layout: `feeder → [worker × N] → collector (calling thread)`
///
/// The first failing or panicking branch raises an abort flag: the feeder
/// stops handing out branches, idle workers exit, and the collector discards
/// anything still in flight. Variants are reassembled by branch index, so the output
/// order never depends on scheduling.
pub struct ThreadedBranchExecutor {
    config: ExecutorConfig,
}

impl ThreadedBranchExecutor {
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    pub fn with_config(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn with_workers(max_workers: usize) -> Self {
        Self::with_config(ExecutorConfig {
            max_workers,
            ..ExecutorConfig::default()
        })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

impl Default for ThreadedBranchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags a worker consults before picking up the next branch.
struct StopFlags<'a> {
    aborted: &'a AtomicBool,
    cancelled: &'a AtomicBool,
}

impl StopFlags<'_> {
    fn should_stop(&self) -> bool {
        self.aborted.load(Ordering::Relaxed) || self.cancelled.load(Ordering::Relaxed)
    }
}

impl BranchExecutor for ThreadedBranchExecutor {
    fn execute(
        &self,
        operations: &[SharedOperation],
        plan: &CompositionPlan,
        signal: &Signal,
        logger: &mut dyn ChainLogger,
        cancelled: &AtomicBool,
    ) -> Result<Vec<Signal>, CompositionError> {
        let total = plan.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let workers = self.config.max_workers.clamp(1, total);
        let cap = self.config.channel_capacity.max(1);
        let aborted = AtomicBool::new(false);
        let flags = StopFlags {
            aborted: &aborted,
            cancelled,
        };

        log::debug!("Running {total} branches on {workers} workers");

        std::thread::scope(|scope| {
            let (branch_tx, branch_rx) = crossbeam_channel::bounded::<&Branch>(cap);
            let (result_tx, result_rx) = crossbeam_channel::bounded::<BranchResult>(cap);

            let feeder = spawn_feeder(scope, plan, branch_tx, &flags);
            let worker_handles: Vec<_> = (0..workers)
                .map(|id| {
                    spawn_worker(
                        scope,
                        id,
                        operations,
                        signal,
                        branch_rx.clone(),
                        result_tx.clone(),
                        &flags,
                    )
                })
                .collect();
            drop(branch_rx);
            drop(result_tx);

            let collected = collect_results(result_rx, total, operations, logger, &aborted);
            let joined = join_threads(feeder, worker_handles);

            let slots = collected?;
            joined?;
            assemble(slots, cancelled)
        })
    }
}

fn spawn_feeder<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    plan: &'env CompositionPlan,
    branch_tx: Sender<&'env Branch>,
    flags: &'scope StopFlags<'env>,
) -> ScopedJoinHandle<'scope, ()> {
    scope.spawn(move || {
        for branch in plan {
            if flags.should_stop() {
                break;
            }
            if branch_tx.send(branch).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    id: usize,
    operations: &'env [SharedOperation],
    signal: &'env Signal,
    branch_rx: Receiver<&'env Branch>,
    result_tx: Sender<BranchResult>,
    flags: &'scope StopFlags<'env>,
) -> ScopedJoinHandle<'scope, ()> {
    scope.spawn(move || {
        for branch in branch_rx {
            if flags.should_stop() {
                break;
            }
            let result = run_branch_guarded(operations, branch, signal);
            if let Err(CompositionError::OperationPanicked { branch: index, .. }) = &result {
                log::error!("Worker {id} caught a panic in branch {index}");
            }
            if result_tx.send(result).is_err() {
                break;
            }
        }
    })
}

/// Drains the result channel until every worker has exited. Returns the
/// variants slotted by branch index, or the first failure observed.
fn collect_results(
    result_rx: Receiver<BranchResult>,
    total: usize,
    operations: &[SharedOperation],
    logger: &mut dyn ChainLogger,
    aborted: &AtomicBool,
) -> Result<Vec<Option<Signal>>, CompositionError> {
    let mut slots: Vec<Option<Signal>> = (0..total).map(|_| None).collect();
    let mut first_error: Option<CompositionError> = None;
    let mut completed = 0;

    for result in result_rx {
        match result {
            Ok(output) if first_error.is_none() => {
                output.report_timings(operations, logger);
                completed += 1;
                logger.progress(completed, total);
                if let Some(slot) = slots.get_mut(output.index) {
                    *slot = Some(output.signal);
                }
            }
            Ok(_) => {}
            Err(err) => {
                if first_error.is_none() {
                    log::warn!("Branch failed, cancelling remaining branches: {err}");
                    aborted.store(true, Ordering::Relaxed);
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(slots),
    }
}

/// Joins the feeder and all workers, reporting the first panic.
fn join_threads(
    feeder: ScopedJoinHandle<'_, ()>,
    workers: Vec<ScopedJoinHandle<'_, ()>>,
) -> Result<(), CompositionError> {
    let mut first_panic = None;

    if feeder.join().is_err() {
        first_panic = Some(CompositionError::ThreadPanicked {
            thread: "feeder".to_string(),
        });
    }

    for (i, handle) in workers.into_iter().enumerate() {
        if handle.join().is_err() && first_panic.is_none() {
            first_panic = Some(CompositionError::ThreadPanicked {
                thread: format!("worker {i}"),
            });
        }
    }

    match first_panic {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn assemble(
    slots: Vec<Option<Signal>>,
    cancelled: &AtomicBool,
) -> Result<Vec<Signal>, CompositionError> {
    if cancelled.load(Ordering::Relaxed) && slots.iter().any(Option::is_none) {
        return Err(CompositionError::Cancelled);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(branch, slot)| slot.ok_or(CompositionError::MissingVariant { branch }))
        .collect()
}
