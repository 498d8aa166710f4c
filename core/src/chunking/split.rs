use crate::chunking::types::Chunk;
use crate::constants::MAX_CHUNK_SIZE;
use crate::types::ConfigError;
use crate::utils::chunk_count;

/// Cut `sequence` into chunks of `chunk_size` symbols. Only the last one may be shorter.
///
/// An empty sequence yields no chunks.
pub fn split(sequence: &[u8], chunk_size: usize) -> Result<Vec<Chunk<'_>>, ConfigError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(ConfigError::InvalidChunkSize {
            chunk_size,
            max: MAX_CHUNK_SIZE,
        });
    }

    let count = chunk_count(sequence.len(), chunk_size);
    if count > u32::MAX as usize {
        return Err(ConfigError::TooManyChunks { chunks: count });
    }

    Ok(sequence
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, symbols)| Chunk {
            ordinal: i as u32,
            symbols,
        })
        .collect())
}

/// Concatenate chunk contents in the order given.
pub fn join<C: AsRef<[u8]>>(chunks: &[C]) -> Vec<u8> {
    let total: usize = chunks.iter().map(|c| c.as_ref().len()).sum();
    let mut out = Vec::with_capacity(total);
    for c in chunks {
        out.extend_from_slice(c.as_ref());
    }
    out
}
