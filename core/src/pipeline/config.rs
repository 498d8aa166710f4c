use crate::codec::FallbackPolicy;
use crate::constants::{DEFAULT_CHUNK_SIZE, INFLIGHT_HARD_CAP, INFLIGHT_PER_WORKER, MAX_CHUNK_SIZE, MAX_WORKERS};
use crate::pipeline::parallelism::ParallelismProfile;
use crate::pipeline::pool::WorkerPool;
use crate::types::ConfigError;

/// Knobs for sequence and batch processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Symbols per chunk.
    pub chunk_size: usize,
    /// Run chunks on the worker pool. `false` processes them inline, in order.
    pub parallel: bool,
    pub max_workers: usize,
    /// Bound on queued chunk tasks and queued results.
    pub inflight_chunks: usize,
    pub fallback: FallbackPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let max_workers = num_cpus::get().clamp(1, MAX_WORKERS);
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel: true,
            max_workers,
            inflight_chunks: (max_workers * INFLIGHT_PER_WORKER).min(INFLIGHT_HARD_CAP),
            fallback: FallbackPolicy::Escape,
        }
    }
}

impl PipelineConfig {
    pub fn sequential() -> Self {
        Self::default().with_parallel(false)
    }

    /// Default config with pool sizing taken from `profile`.
    pub fn from_profile(profile: ParallelismProfile) -> Self {
        Self {
            max_workers: profile.worker_count,
            inflight_chunks: profile.inflight_chunks,
            parallel: profile.worker_count > 1,
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_inflight_chunks(mut self, inflight_chunks: usize) -> Self {
        self.inflight_chunks = inflight_chunks;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::InvalidChunkSize {
                chunk_size: self.chunk_size,
                max: MAX_CHUNK_SIZE,
            });
        }
        if self.max_workers == 0 || self.max_workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkers {
                workers: self.max_workers,
                max: MAX_WORKERS,
            });
        }
        if self.inflight_chunks == 0 {
            return Err(ConfigError::InvalidInflight(self.inflight_chunks));
        }
        Ok(())
    }

    /// The pool this config asks for. Inline unless parallel with more than one worker.
    pub fn pool(&self) -> WorkerPool {
        if self.parallel && self.max_workers > 1 {
            WorkerPool::new(self.max_workers, self.inflight_chunks)
        } else {
            WorkerPool::inline()
        }
    }
}
