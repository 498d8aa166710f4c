// ## 📂 File: `src/cipher/types.rs`

use std::fmt;

use num_enum::TryFromPrimitive;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::cipher_ids;
use crate::utils::enum_name_or_hex;

/// Stable key and nonce sizes.
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte nonce length for AES-GCM and ChaCha20-Poly1305.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Record prefix: suite id (u16 LE) followed by the nonce.
pub const RECORD_PREFIX_LEN: usize = 2 + NONCE_LEN_12;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum CipherSuite {
    Aes256Gcm        = cipher_ids::AES256_GCM,
    Chacha20Poly1305 = cipher_ids::CHACHA20_POLY1305,
}

impl CipherSuite {
    pub fn id(self) -> u16 {
        self as u16
    }
}

fn suite_name(raw: &u16) -> String {
    enum_name_or_hex::<CipherSuite>(*raw)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// AEAD tag mismatch: the key does not belong to this record, or the record was altered.
    #[error("key does not match record (authentication failed)")]
    KeyMismatch,

    #[error("unsupported cipher suite: {}", suite_name(.cipher_id))]
    UnsupportedCipher { cipher_id: u16 },

    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    #[error("malformed encrypted record: {0}")]
    MalformedRecord(String),

    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("cipher failure: {0}")]
    Failure(String),
}

/// Secret key material for exactly one chunk.
///
/// Wiped on drop. `Debug` never prints the bytes. Equality runs in constant time.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ChunkKey(Vec<u8>);

impl PartialEq for ChunkKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for ChunkKey {}

impl ChunkKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Fresh random key from the OS generator.
    pub fn generate(len: usize) -> Self {
        let mut bytes = vec![0u8; len];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CipherError> {
        hex::decode(s.trim())
            .map(Self)
            .map_err(|e| CipherError::InvalidKeyEncoding(e.to_string()))
    }
}

impl fmt::Debug for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkKey(<{} bytes redacted>)", self.0.len())
    }
}

/// Opaque ciphertext for one chunk, as produced by a `PrimitiveCipher`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord(Vec<u8>);

impl EncryptedRecord {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Mutable access, mainly for corruption tests.
    pub fn as_mut_bytes(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for EncryptedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedRecord({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_key_bytes() {
        let key = ChunkKey::from_bytes(vec![0xAB; 32]);
        let shown = format!("{:?}", key);
        assert!(!shown.contains("ab") && !shown.contains("171"));
        assert!(shown.contains("32 bytes redacted"));
    }

    #[test]
    fn hex_round_trip() {
        let key = ChunkKey::generate(KEY_LEN_32);
        assert_eq!(ChunkKey::from_hex(&key.to_hex()).unwrap(), key);
        assert!(ChunkKey::from_hex("zz").is_err());
    }

    #[test]
    fn key_equality_compares_every_byte() {
        let key = ChunkKey::from_bytes(vec![0x11; KEY_LEN_32]);
        let mut last_differs = vec![0x11; KEY_LEN_32];
        last_differs[KEY_LEN_32 - 1] = 0x12;

        assert_eq!(key, ChunkKey::from_bytes(vec![0x11; KEY_LEN_32]));
        assert_ne!(key, ChunkKey::from_bytes(last_differs));
        assert_ne!(key, ChunkKey::from_bytes(vec![0x11; KEY_LEN_32 - 1]));
    }

    #[test]
    fn unsupported_suite_message_shows_hex() {
        let msg = CipherError::UnsupportedCipher { cipher_id: 0x99 }.to_string();
        assert!(msg.contains("0x99"));
    }
}
