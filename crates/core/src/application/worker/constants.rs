// Worker constants (no magic values)

/// Default number of worker tasks per pool
pub const DEFAULT_CONCURRENCY: usize = 5;
