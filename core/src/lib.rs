//! dnasecure-core
//!
//! Pure Rust chunked DNA sequence encryption engine.
//! Symbols become big integers, long sequences are cut into chunks, and every
//! chunk is sealed under its own freshly generated key.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Leaf components
pub mod codec;
pub mod chunking;
pub mod cipher;
pub mod records;
pub mod telemetry;

// Workers and orchestration
pub mod chunk_worker;
pub mod pipeline;

// Persisted artifacts
pub mod envelope;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::cipher::{AeadCipher, ChunkKey, CipherSuite, EncryptedRecord, PrimitiveCipher};
    pub use crate::codec::FallbackPolicy;
    pub use crate::pipeline::{
        decrypt_many, decrypt_sequence, encrypt_labeled_sequence, encrypt_many, encrypt_sequence,
        BatchItemError, BatchReport, PipelineConfig, SequenceError,
    };
    pub use crate::records::{EncryptedChunk, EncryptedSequenceRecord, KeyBundle, LabeledSequence};
    pub use crate::types::{ConfigError, SecureError};
}
