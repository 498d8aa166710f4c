use thiserror::Error;

use crate::cipher::{ChunkKey, CipherError, EncryptedRecord};
use crate::codec::CodecError;
use crate::telemetry::StageTimes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkWorkerError {
    #[error("encode failed: {0}")]
    Encode(#[source] CodecError),

    #[error("encryption failed: {0}")]
    Encryption(#[source] CipherError),

    #[error("chunk decryption failed: {0}")]
    ChunkDecryption(#[source] CipherError),

    #[error("chunk length mismatch: expected {expected} symbols, decoded {actual}")]
    ChunkLengthMismatch { expected: usize, actual: usize },

    #[error("decode failed: {0}")]
    Decode(#[source] CodecError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Output of chunk encryption. Record and key leave together and are split
/// apart by the assembler.
#[derive(Debug)]
pub struct EncryptedChunkOutput {
    pub ordinal: u32,
    pub symbol_len: u32,
    /// Symbols that went through the codec escape.
    pub escaped: usize,
    pub record: EncryptedRecord,
    pub key: ChunkKey,
    pub stage_times: StageTimes,
}

/// One chunk's worth of decryption work, borrowed from a record and its bundle.
#[derive(Debug, Clone, Copy)]
pub struct DecryptChunkInput<'a> {
    pub ordinal: u32,
    pub record: &'a EncryptedRecord,
    pub key: &'a ChunkKey,
    pub expected_len: usize,
}

/// Output of chunk decryption.
#[derive(Debug)]
pub struct DecryptedChunk {
    pub ordinal: u32,
    pub symbols: Vec<u8>,
    pub record_len: usize,
    pub stage_times: StageTimes,
}

impl AsRef<[u8]> for DecryptedChunk {
    fn as_ref(&self) -> &[u8] {
        &self.symbols
    }
}
