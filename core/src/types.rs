use std::io;
use thiserror::Error;

use crate::{
    chunk_worker::ChunkWorkerError,
    cipher::CipherError,
    codec::CodecError,
    envelope::EnvelopeError,
    pipeline::SequenceError,
};

/// Configuration rejected before any work is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid chunk size: {chunk_size}, must be within 1..={max}")]
    InvalidChunkSize { chunk_size: usize, max: usize },

    #[error("invalid workers count: {workers}, must be within 1..={max}")]
    InvalidWorkers { workers: usize, max: usize },

    #[error("invalid in-flight chunk budget: {0}, must be at least 1")]
    InvalidInflight(usize),

    #[error("sequence needs {chunks} chunks, more than a record can index")]
    TooManyChunks { chunks: usize },
}

/// Unified error covering codec, config, cipher, chunk, sequence, and envelope failures.
/// - `From<T>` impls enable `?` across layers.
/// - Messages aim to be stable and contextual for logs.
#[derive(Debug, Error)]
pub enum SecureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("chunk worker error: {0}")]
    ChunkWorker(#[from] ChunkWorkerError),

    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),

    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
}
