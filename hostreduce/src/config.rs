//! Runtime-configurable tuning parameters for the CPU reducer.
//!
//! All values have sensible defaults. Override via environment variables
//! (prefixed `HOSTREDUCE_`) or by constructing a custom `ReducerConfig`.

/// Worker threads a single `sum` call may use unless overridden.
pub const DEFAULT_REDUCER_THREADS: usize = 4;

/// Buffers smaller than this are summed on the calling thread.
pub const DEFAULT_MIN_PARALLEL_BYTES: usize = 64 * 1024;

/// Label of the sub-communicator the reducer builds over its peer group.
pub const DEFAULT_COMM_LABEL: &str = "cpu";

/// Tuning parameters for the CPU reducer.
#[derive(Debug, Clone)]
pub struct ReducerConfig {
    /// Upper bound on worker threads used by one reduction call.
    pub threads: usize,

    /// Below this many bytes the reduction skips the thread pool.
    pub min_parallel_bytes: usize,

    /// Label attached to the peer-group sub-communicator.
    pub comm_label: String,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_REDUCER_THREADS,
            min_parallel_bytes: DEFAULT_MIN_PARALLEL_BYTES,
            comm_label: DEFAULT_COMM_LABEL.to_string(),
        }
    }
}

impl ReducerConfig {
    /// Load config from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `HOSTREDUCE_CPU_REDUCER_THREADS`
    /// - `HOSTREDUCE_MIN_PARALLEL_BYTES`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup("HOSTREDUCE_CPU_REDUCER_THREADS") {
            match v.trim().parse::<usize>() {
                Ok(n) => cfg.threads = n.max(1),
                Err(_) => tracing::warn!(
                    value = %v,
                    "ignoring invalid HOSTREDUCE_CPU_REDUCER_THREADS"
                ),
            }
        }
        if let Some(v) = lookup("HOSTREDUCE_MIN_PARALLEL_BYTES") {
            match v.trim().parse::<usize>() {
                Ok(n) => cfg.min_parallel_bytes = n,
                Err(_) => tracing::warn!(
                    value = %v,
                    "ignoring invalid HOSTREDUCE_MIN_PARALLEL_BYTES"
                ),
            }
        }

        cfg
    }
}
