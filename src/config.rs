//! Runtime constants and host-derived settings

/// Upper bound on concurrent derivation-metadata lookups
pub const MAX_META_WORKERS: usize = 32;

/// Parallelism assumed when the host does not report one
const FALLBACK_PARALLELISM: usize = 4;

/// Default path for the structured diff document
pub const DEFAULT_DIFF_OUTPUT: &str = "pkg-diff.json";

/// Number of concurrent workers for the metadata fan-out:
/// min(32, host parallelism).
pub fn meta_worker_count() -> usize {
    let parallelism = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_PARALLELISM);
    MAX_META_WORKERS.min(parallelism)
}
