// ## 📂 File: `src/cipher/aead.rs`

//! src/cipher/aead.rs
//! AEAD backends for AES-256-GCM and ChaCha20-Poly1305.
//!
//! Design notes:
//! - Both ciphers use 32-byte keys and 12-byte nonces.
//! - Tag verification must fail closed (no partial plaintext).
//! - Each chunk key seals exactly one message, so a random nonce never repeats under a key.

use crate::cipher::types::{CipherError, CipherSuite, KEY_LEN_32, NONCE_LEN_12, TAG_LEN};
use crate::constants::AAD_DOMAIN;

use aes_gcm::aead::{Aead, KeyInit, Payload};

use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use chacha20poly1305::{ChaCha20Poly1305, Nonce as ChaNonce};

#[derive(Clone)]
pub enum AeadImpl {
    AesGcm(Aes256Gcm),
    ChaCha(ChaCha20Poly1305),
}

impl AeadImpl {
    /// Construct the backend for `suite` keyed with one chunk key.
    pub fn from_suite_and_key(suite: CipherSuite, key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN_32 {
            return Err(CipherError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.len(),
            });
        }

        match suite {
            CipherSuite::Aes256Gcm => {
                let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLen {
                    expected: KEY_LEN_32,
                    actual: key.len(),
                })?;
                Ok(Self::AesGcm(cipher))
            }
            CipherSuite::Chacha20Poly1305 => {
                let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLen {
                    expected: KEY_LEN_32,
                    actual: key.len(),
                })?;
                Ok(Self::ChaCha(cipher))
            }
        }
    }

    pub fn seal(&self, nonce_12: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if nonce_12.len() != NONCE_LEN_12 {
            return Err(CipherError::Failure(format!(
                "nonce must be {} bytes, got {}",
                NONCE_LEN_12,
                nonce_12.len()
            )));
        }

        if plaintext.is_empty() {
            return Err(CipherError::Failure("plaintext must not be empty".into()));
        }

        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .encrypt(AesNonce::from_slice(nonce_12), Payload { msg: plaintext, aad })
                .map_err(|_| CipherError::Failure("AES-GCM seal failed".into())),
            AeadImpl::ChaCha(cipher) => cipher
                .encrypt(ChaNonce::from_slice(nonce_12), Payload { msg: plaintext, aad })
                .map_err(|_| CipherError::Failure("ChaCha20-Poly1305 seal failed".into())),
        }
    }

    pub fn open(&self, nonce_12: &[u8], aad: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CipherError> {
        if nonce_12.len() != NONCE_LEN_12 {
            return Err(CipherError::MalformedRecord(format!(
                "nonce must be {} bytes, got {}",
                NONCE_LEN_12,
                nonce_12.len()
            )));
        }

        if ciphertext_and_tag.len() < TAG_LEN {
            return Err(CipherError::MalformedRecord("ciphertext too short".into()));
        }

        match self {
            AeadImpl::AesGcm(cipher) => cipher
                .decrypt(AesNonce::from_slice(nonce_12), Payload { msg: ciphertext_and_tag, aad })
                .map_err(|_| CipherError::KeyMismatch),
            AeadImpl::ChaCha(cipher) => cipher
                .decrypt(ChaNonce::from_slice(nonce_12), Payload { msg: ciphertext_and_tag, aad })
                .map_err(|_| CipherError::KeyMismatch),
        }
    }
}

/// Associated data: suite id (u16 LE) followed by the domain tag.
pub fn build_aad(suite: CipherSuite) -> Vec<u8> {
    let mut aad = Vec::with_capacity(2 + AAD_DOMAIN.len());
    aad.extend_from_slice(&suite.id().to_le_bytes());
    aad.extend_from_slice(AAD_DOMAIN);
    aad
}
