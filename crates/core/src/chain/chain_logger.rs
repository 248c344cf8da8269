use std::collections::HashMap;
use std::time::Instant;

use crate::shared::constants::DEFAULT_PROGRESS_THROTTLE;

/// Cross-cutting observer for chain invocations.
///
/// Decouples executors from the output mechanism so a dataset runner can
/// collect timings or progress without changing composition code.
pub trait ChainLogger: Send {
    /// Report branch-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long one operation call took.
    fn timing(&mut self, operation: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-invocation summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullChainLogger;

impl ChainLogger for NullChainLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _operation: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` facade that aggregates per-operation timing
/// and reports a summary when asked.
///
/// Progress lines are throttled to every `throttle_branches` branches so a
/// large combinatoric expansion does not flood the log.
pub struct LogChainLogger {
    throttle_branches: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_branches: usize,
    completed_branches: usize,
    messages: Vec<String>,
}

impl LogChainLogger {
    pub fn new(throttle_branches: usize) -> Self {
        Self {
            throttle_branches: throttle_branches.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            total_branches: 0,
            completed_branches: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary, or `None` if nothing was timed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = Vec::new();

        lines.push(format!(
            "Chain summary ({}/{} branches, {:.1}s total):",
            self.completed_branches,
            self.total_branches,
            elapsed_ms / 1000.0
        ));

        let mut operations: Vec<_> = self.timings.keys().collect();
        operations.sort();
        for operation in operations {
            let durations = &self.timings[operation];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len() as f64;
            lines.push(format!(
                "  {operation:16}: {calls:5} calls  avg {avg_ms:7.2}ms  total {total_ms:8.1}ms",
                calls = durations.len()
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, operation: &str) -> Option<&[f64]> {
        self.timings.get(operation).map(|v| v.as_slice())
    }

    pub fn completed_branches(&self) -> usize {
        self.completed_branches
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for LogChainLogger {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_THROTTLE)
    }
}

impl ChainLogger for LogChainLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_branches = total;
        self.completed_branches = current;
        if total > 0 && (current % self.throttle_branches == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Augmenting: {current}/{total} variants ({pct:.1}%)");
        }
    }

    fn timing(&mut self, operation: &str, duration_ms: f64) {
        self.timings
            .entry(operation.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
