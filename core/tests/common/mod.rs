#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use num_bigint::BigUint;
use rand::Rng;

use dnasecure_core::cipher::{ChunkKey, CipherError, EncryptedRecord, PrimitiveCipher};

pub const TEST_SUITE_ID: u16 = 0xFFFF;
const RECORD_MARKER: u8 = 0xD5;

/// Transparent cipher that stamps each record with the id of the key issued for it.
///
/// - keys are sequential ids, so identity is easy to assert
/// - decrypting with any other key fails with `KeyMismatch`
/// - optional random delay per call, to shuffle completion order
/// - optional poisoned number that makes `encrypt` fail
pub struct KeyedTestCipher {
    next_id: AtomicU64,
    max_delay_ms: u64,
    poisoned: Option<BigUint>,
}

impl KeyedTestCipher {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            max_delay_ms: 0,
            poisoned: None,
        }
    }

    pub fn with_random_delay(mut self, max_delay_ms: u64) -> Self {
        self.max_delay_ms = max_delay_ms;
        self
    }

    pub fn failing_on(mut self, number: BigUint) -> Self {
        self.poisoned = Some(number);
        self
    }

    pub fn keys_issued(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst) - 1
    }

    pub fn key_id(key: &ChunkKey) -> u64 {
        let mut id = [0u8; 8];
        id.copy_from_slice(&key.as_bytes()[..8]);
        u64::from_le_bytes(id)
    }

    fn jitter(&self) {
        if self.max_delay_ms > 0 {
            let ms = rand::thread_rng().gen_range(0..=self.max_delay_ms);
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

impl PrimitiveCipher for KeyedTestCipher {
    fn encrypt(&self, number: &BigUint) -> Result<(EncryptedRecord, ChunkKey), CipherError> {
        self.jitter();
        if self.poisoned.as_ref() == Some(number) {
            return Err(CipherError::Failure("poisoned number".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut wire = vec![RECORD_MARKER];
        wire.extend_from_slice(&id.to_le_bytes());
        wire.extend_from_slice(&number.to_bytes_be());

        Ok((EncryptedRecord::from_vec(wire), ChunkKey::from_bytes(id.to_le_bytes().to_vec())))
    }

    fn decrypt(&self, record: &EncryptedRecord, key: &ChunkKey) -> Result<BigUint, CipherError> {
        self.jitter();
        let bytes = record.as_bytes();
        if bytes.len() < 9 || bytes[0] != RECORD_MARKER {
            return Err(CipherError::MalformedRecord("not a test record".into()));
        }
        if key.len() != 8 {
            return Err(CipherError::InvalidKeyLen { expected: 8, actual: key.len() });
        }
        if &bytes[1..9] != key.as_bytes() {
            return Err(CipherError::KeyMismatch);
        }
        Ok(BigUint::from_bytes_be(&bytes[9..]))
    }

    fn suite_id(&self) -> u16 {
        TEST_SUITE_ID
    }
}

/// Pseudo-random nucleotide string, reproducible per seed.
pub fn nucleotides(len: usize, seed: u64) -> Vec<u8> {
    use rand::{rngs::StdRng, SeedableRng};
    const ALPHABET: &[u8] = b"ACGT";
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())]).collect()
}

/// Route `tracing` output to the test harness, once per binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
