/// Defaults when a config field is not supplied.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000; // symbols per chunk
/// Largest chunk size a config may request. Chunk lengths are persisted as `u32`.
pub const MAX_CHUNK_SIZE: usize = u32::MAX as usize;

/// Upper bound on worker threads a config may request.
pub const MAX_WORKERS: usize = 1024;
/// Queue slots granted per worker when no profile is supplied.
pub const INFLIGHT_PER_WORKER: usize = 4;
/// Hard cap on queued chunk tasks, whatever the memory budget allows.
pub const INFLIGHT_HARD_CAP: usize = 256;
/// Rough bytes of working memory per symbol of an in-flight chunk
/// (input slice, digit buffer, big integer, ciphertext).
pub const CHUNK_MEMORY_FACTOR: u64 = 4;

/// Symbol codec radix. One hex digit per primary symbol.
pub const DIGIT_RADIX: u8 = 16;
/// Digit that opens a two-digit raw byte escape.
pub const ESCAPE_DIGIT: u8 = 0x0F;

/// Magic numbers for the persisted artifacts.
/// "DSR1" = DNA Secure Records v1, "DSK1" = DNA Secure Keys v1.
pub const MAGIC_RECORDS: [u8; 4] = *b"DSR1";
pub const MAGIC_KEYS: [u8; 4] = *b"DSK1";
pub const ENVELOPE_V1: u16 = 1;

/// Domain tag bound into every chunk's AEAD associated data.
pub const AAD_DOMAIN: &[u8] = b"dnasecure/chunk/v1";

/// Cipher suite identifiers (mirrored in records).
pub mod cipher_ids {
    pub const AES256_GCM: u16        = 0x0001;
    pub const CHACHA20_POLY1305: u16 = 0x0002;
}
