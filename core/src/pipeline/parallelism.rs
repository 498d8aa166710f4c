use crate::constants::{CHUNK_MEMORY_FACTOR, INFLIGHT_HARD_CAP, MAX_WORKERS};

/// Worker and queue sizing for the chunk pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    pub inflight_chunks: usize,
}

impl ParallelismProfile {
    pub fn single_threaded() -> Self {
        Self {
            worker_count: 1,
            inflight_chunks: 1,
        }
    }

    /// Size the pool from the host: one worker per core, and as many queued
    /// chunks as `mem_fraction` of available memory holds, capped at `hard_cap`.
    pub fn dynamic(chunk_size: usize, mem_fraction: f64, hard_cap: usize) -> Self {
        let worker_count = num_cpus::get().clamp(1, MAX_WORKERS);

        let mut sys = sysinfo::System::new();
        sys.refresh_memory();
        let avail_bytes = sys.available_memory();

        let budget = (avail_bytes as f64 * mem_fraction.clamp(0.0, 1.0)) as u64;
        let per_chunk = (chunk_size as u64).max(1) * CHUNK_MEMORY_FACTOR;
        let max_chunks = (budget / per_chunk) as usize;

        let inflight_chunks = max_chunks.min(hard_cap).max(1);

        tracing::debug!(
            worker_count,
            inflight_chunks,
            avail_bytes,
            "dynamic parallelism profile"
        );

        Self {
            worker_count,
            inflight_chunks,
        }
    }

    /// `dynamic` with a quarter of available memory and the default cap.
    pub fn for_chunk_size(chunk_size: usize) -> Self {
        Self::dynamic(chunk_size, 0.25, INFLIGHT_HARD_CAP)
    }
}
