#[cfg(test)]
mod tests {
    use dnasecure_core::codec::FallbackPolicy;
    use dnasecure_core::constants::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MAX_WORKERS};
    use dnasecure_core::pipeline::{ParallelismProfile, PipelineConfig};
    use dnasecure_core::types::ConfigError;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(cfg.fallback, FallbackPolicy::Escape);
        assert!(cfg.parallel);
        assert!(cfg.max_workers >= 1);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let base = PipelineConfig::default();

        assert_eq!(
            base.with_chunk_size(0).validate(),
            Err(ConfigError::InvalidChunkSize { chunk_size: 0, max: MAX_CHUNK_SIZE })
        );
        assert!(matches!(
            base.with_chunk_size(MAX_CHUNK_SIZE + 1).validate(),
            Err(ConfigError::InvalidChunkSize { .. })
        ));
        assert_eq!(
            base.with_max_workers(0).validate(),
            Err(ConfigError::InvalidWorkers { workers: 0, max: MAX_WORKERS })
        );
        assert_eq!(base.with_inflight_chunks(0).validate(), Err(ConfigError::InvalidInflight(0)));
    }

    #[test]
    fn test_chunk_size_spans_the_persisted_u32_range() {
        assert_eq!(MAX_CHUNK_SIZE, u32::MAX as usize);
        let base = PipelineConfig::default();
        base.with_chunk_size(1).validate().unwrap();
        base.with_chunk_size(20_000_000).validate().unwrap();
        base.with_chunk_size(MAX_CHUNK_SIZE).validate().unwrap();
    }

    #[test]
    fn test_pool_is_inline_unless_parallel_with_workers() {
        let base = PipelineConfig::default().with_max_workers(4);
        assert!(!base.pool().is_inline());
        assert!(base.with_parallel(false).pool().is_inline());
        assert!(base.with_max_workers(1).pool().is_inline());
        assert!(PipelineConfig::sequential().pool().is_inline());
    }

    #[test]
    fn test_profile_feeds_config() {
        let cfg = PipelineConfig::from_profile(ParallelismProfile::single_threaded());
        assert_eq!(cfg.max_workers, 1);
        assert_eq!(cfg.inflight_chunks, 1);
        assert!(!cfg.parallel);
        cfg.validate().unwrap();

        let dynamic = PipelineConfig::from_profile(ParallelismProfile::for_chunk_size(DEFAULT_CHUNK_SIZE));
        dynamic.validate().unwrap();
    }
}
