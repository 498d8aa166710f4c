use crate::chunking::Chunk;
use crate::cipher::PrimitiveCipher;
use crate::codec::{encode, FallbackPolicy};
use crate::telemetry::{Stage, StageTimes};
use super::types::{ChunkWorkerError, EncryptedChunkOutput};

/// Encodes and encrypts single chunks. Holds no per-chunk state, so one
/// instance is shared by every worker thread.
pub struct EncryptChunkWorker<'c, C: PrimitiveCipher + ?Sized> {
    cipher: &'c C,
    fallback: FallbackPolicy,
}

impl<'c, C: PrimitiveCipher + ?Sized> EncryptChunkWorker<'c, C> {
    pub fn new(cipher: &'c C, fallback: FallbackPolicy) -> Self {
        Self { cipher, fallback }
    }

    pub fn encrypt_chunk(&self, chunk: &Chunk<'_>) -> Result<EncryptedChunkOutput, ChunkWorkerError> {
        if chunk.is_empty() {
            return Err(ChunkWorkerError::InvalidInput(format!(
                "chunk {} is empty",
                chunk.ordinal
            )));
        }

        let mut stage_times = StageTimes::default();

        // 1️⃣ Symbols to number
        let number = stage_times
            .measure(Stage::Encode, || encode(chunk.symbols, self.fallback))
            .map_err(ChunkWorkerError::Encode)?;

        // 2️⃣ Encrypt under a key the adapter generates for this chunk alone
        let (record, key) = stage_times
            .measure(Stage::Encrypt, || self.cipher.encrypt(&number.value))
            .map_err(ChunkWorkerError::Encryption)?;

        tracing::trace!(
            ordinal = chunk.ordinal,
            symbols = chunk.len(),
            record_len = record.len(),
            "chunk encrypted"
        );

        Ok(EncryptedChunkOutput {
            ordinal: chunk.ordinal,
            symbol_len: chunk.len() as u32,
            escaped: number.escaped,
            record,
            key,
            stage_times,
        })
    }
}
