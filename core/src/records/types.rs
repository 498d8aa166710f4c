use serde::{Deserialize, Serialize};

use crate::cipher::{ChunkKey, EncryptedRecord};

/// One encrypted chunk plus the metadata needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedChunk {
    pub ordinal: u32,
    /// Symbols in the chunk before encoding.
    pub symbol_len: u32,
    pub record: EncryptedRecord,
}

/// Everything about an encrypted sequence except its keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSequenceRecord {
    pub label: Option<String>,
    pub total_len: u64,
    pub chunk_size: u32,
    /// `PrimitiveCipher::suite_id` of the adapter that produced the chunks.
    pub cipher_id: u16,
    /// In ordinal order.
    pub chunks: Vec<EncryptedChunk>,
}

impl EncryptedSequenceRecord {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn record_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.record.len()).sum()
    }
}

/// Keys for one sequence; position `i` belongs to chunk ordinal `i`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyBundle {
    pub label: Option<String>,
    pub keys: Vec<ChunkKey>,
}

impl KeyBundle {
    pub fn new(label: Option<String>, keys: Vec<ChunkKey>) -> Self {
        Self { label, keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, ordinal: u32) -> Option<&ChunkKey> {
        self.keys.get(ordinal as usize)
    }

    pub fn key_bytes(&self) -> usize {
        self.keys.iter().map(ChunkKey::len).sum()
    }
}

/// Input to batch encryption.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabeledSequence {
    pub label: Option<String>,
    pub symbols: Vec<u8>,
}

impl LabeledSequence {
    pub fn new(label: impl Into<String>, symbols: impl Into<Vec<u8>>) -> Self {
        Self {
            label: Some(label.into()),
            symbols: symbols.into(),
        }
    }

    pub fn unlabeled(symbols: impl Into<Vec<u8>>) -> Self {
        Self {
            label: None,
            symbols: symbols.into(),
        }
    }
}
