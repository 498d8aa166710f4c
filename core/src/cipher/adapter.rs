// ## 📂 File: `src/cipher/adapter.rs`

use num_bigint::BigUint;
use rand::{rngs::OsRng, RngCore};

use crate::cipher::aead::{build_aad, AeadImpl};
use crate::cipher::types::{
    ChunkKey, CipherError, CipherSuite, EncryptedRecord, KEY_LEN_32, NONCE_LEN_12, RECORD_PREFIX_LEN, TAG_LEN,
};

/// Narrow seam between the pipeline and the primitive doing the actual encryption.
///
/// Contract:
/// - every `encrypt` call generates fresh key material and hands it back;
///   no key is shared between calls.
/// - `decrypt` with the key returned alongside a record yields the original number.
/// - `decrypt` with any other key fails; it never returns a wrong number silently.
///
/// Implementations are shared across worker threads.
pub trait PrimitiveCipher: Send + Sync {
    fn encrypt(&self, number: &BigUint) -> Result<(EncryptedRecord, ChunkKey), CipherError>;

    fn decrypt(&self, record: &EncryptedRecord, key: &ChunkKey) -> Result<BigUint, CipherError>;

    /// Identifier persisted in sequence records.
    fn suite_id(&self) -> u16;

    /// Whether records tagged `cipher_id` can be opened by this adapter.
    fn accepts(&self, cipher_id: u16) -> bool {
        cipher_id == self.suite_id()
    }
}

/// Default adapter: one random 256-bit key and nonce per chunk, sealed with an AEAD.
///
/// Record layout: `[suite u16 LE][nonce 12][ciphertext || tag]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeadCipher {
    suite: CipherSuite,
}

impl AeadCipher {
    pub fn new(suite: CipherSuite) -> Self {
        Self { suite }
    }

    pub fn aes256_gcm() -> Self {
        Self::new(CipherSuite::Aes256Gcm)
    }

    pub fn chacha20_poly1305() -> Self {
        Self::new(CipherSuite::Chacha20Poly1305)
    }

    pub fn suite(&self) -> CipherSuite {
        self.suite
    }
}

impl Default for AeadCipher {
    fn default() -> Self {
        Self::aes256_gcm()
    }
}

impl PrimitiveCipher for AeadCipher {
    fn encrypt(&self, number: &BigUint) -> Result<(EncryptedRecord, ChunkKey), CipherError> {
        let key = ChunkKey::generate(KEY_LEN_32);
        let mut nonce = [0u8; NONCE_LEN_12];
        OsRng.fill_bytes(&mut nonce);

        let aead = AeadImpl::from_suite_and_key(self.suite, key.as_bytes())?;
        let ciphertext = aead.seal(&nonce, &build_aad(self.suite), &number.to_bytes_be())?;

        let mut wire = Vec::with_capacity(RECORD_PREFIX_LEN + ciphertext.len());
        wire.extend_from_slice(&self.suite.id().to_le_bytes());
        wire.extend_from_slice(&nonce);
        wire.extend_from_slice(&ciphertext);

        Ok((EncryptedRecord::from_vec(wire), key))
    }

    fn decrypt(&self, record: &EncryptedRecord, key: &ChunkKey) -> Result<BigUint, CipherError> {
        let bytes = record.as_bytes();
        if bytes.len() < RECORD_PREFIX_LEN + TAG_LEN {
            return Err(CipherError::MalformedRecord(format!(
                "record is {} bytes, shorter than prefix and tag",
                bytes.len()
            )));
        }

        // The record names its own suite.
        let raw = u16::from_le_bytes([bytes[0], bytes[1]]);
        let suite = CipherSuite::try_from(raw).map_err(|_| CipherError::UnsupportedCipher { cipher_id: raw })?;

        let nonce = &bytes[2..RECORD_PREFIX_LEN];
        let ciphertext = &bytes[RECORD_PREFIX_LEN..];

        let aead = AeadImpl::from_suite_and_key(suite, key.as_bytes())?;
        let plaintext = aead.open(nonce, &build_aad(suite), ciphertext)?;
        Ok(BigUint::from_bytes_be(&plaintext))
    }

    fn suite_id(&self) -> u16 {
        self.suite.id()
    }

    fn accepts(&self, cipher_id: u16) -> bool {
        CipherSuite::try_from(cipher_id).is_ok()
    }
}
