/// Largest operation count a combinatoric chain will expand (2^24 variants).
pub const MAX_COMBINATORIC_OPERATIONS: usize = 24;

/// Bounded queue depth between the branch feeder and the worker pool.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Worker count used when the platform cannot report its parallelism.
pub const FALLBACK_WORKER_COUNT: usize = 4;

/// Log a progress line every this many completed branches.
pub const DEFAULT_PROGRESS_THROTTLE: usize = 16;
