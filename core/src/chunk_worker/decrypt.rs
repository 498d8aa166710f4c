use crate::cipher::PrimitiveCipher;
use crate::codec::{decode, CodecError};
use crate::telemetry::{Stage, StageTimes};
use super::types::{ChunkWorkerError, DecryptChunkInput, DecryptedChunk};

pub struct DecryptChunkWorker<'c, C: PrimitiveCipher + ?Sized> {
    cipher: &'c C,
}

impl<'c, C: PrimitiveCipher + ?Sized> DecryptChunkWorker<'c, C> {
    pub fn new(cipher: &'c C) -> Self {
        Self { cipher }
    }

    pub fn decrypt_chunk(&self, input: &DecryptChunkInput<'_>) -> Result<DecryptedChunk, ChunkWorkerError> {
        let mut stage_times = StageTimes::default();

        // 1️⃣ Open the record with its own key
        let number = stage_times
            .measure(Stage::Decrypt, || self.cipher.decrypt(input.record, input.key))
            .map_err(ChunkWorkerError::ChunkDecryption)?;

        // 2️⃣ Number to symbols, bounded by the stored length
        let decoded = stage_times.measure(Stage::Decode, || decode(&number, input.expected_len));
        let symbols = match decoded {
            Ok(symbols) => symbols,
            Err(CodecError::CorruptLength { length, required }) => {
                return Err(ChunkWorkerError::ChunkLengthMismatch {
                    expected: length,
                    actual: required,
                });
            }
            Err(e) => return Err(ChunkWorkerError::Decode(e)),
        };

        // 3️⃣ Exact length check
        if symbols.len() != input.expected_len {
            return Err(ChunkWorkerError::ChunkLengthMismatch {
                expected: input.expected_len,
                actual: symbols.len(),
            });
        }

        tracing::trace!(ordinal = input.ordinal, symbols = symbols.len(), "chunk decrypted");

        Ok(DecryptedChunk {
            ordinal: input.ordinal,
            symbols,
            record_len: input.record.len(),
            stage_times,
        })
    }
}
