use std::io;

use bitflags::bitflags;
use thiserror::Error;

use crate::constants::{ENVELOPE_V1, MAGIC_KEYS, MAGIC_RECORDS};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EnvelopeFlags: u16 {
        /// At least one entry carries a label.
        const HAS_LABELS   = 0b0000_0001;
        /// Payload holds secret key material.
        const KEY_MATERIAL = 0b0000_0010;
    }
}

/// Which artifact an envelope holds. Records and keys never share a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Records,
    KeyBundles,
}

impl EnvelopeKind {
    pub fn magic(self) -> [u8; 4] {
        match self {
            EnvelopeKind::Records => MAGIC_RECORDS,
            EnvelopeKind::KeyBundles => MAGIC_KEYS,
        }
    }

    pub fn required_flags(self) -> EnvelopeFlags {
        match self {
            EnvelopeKind::Records => EnvelopeFlags::empty(),
            EnvelopeKind::KeyBundles => EnvelopeFlags::KEY_MATERIAL,
        }
    }
}

/// Fixed-size envelope header (little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: EnvelopeFlags,
    pub entry_count: u32,
    pub payload_len: u64,
    /// CRC32 of the payload.
    pub crc32: u32,
}

impl EnvelopeHeader {
    pub const LEN: usize = 4 // magic
        + 2                  // version
        + 2                  // flags
        + 4                  // entry_count
        + 8                  // payload_len
        + 4;                 // crc32

    pub fn new(kind: EnvelopeKind, flags: EnvelopeFlags, entry_count: u32, payload_len: u64, crc32: u32) -> Self {
        Self {
            magic: kind.magic(),
            version: ENVELOPE_V1,
            flags: flags | kind.required_flags(),
            entry_count,
            payload_len,
            crc32,
        }
    }
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unsupported envelope version: {0}")]
    UnsupportedVersion(u16),

    #[error("unknown envelope flags: 0x{0:04x}")]
    UnknownFlags(u16),

    #[error("flags 0x{found:04x} do not fit this envelope kind")]
    FlagsMismatch { found: u16 },

    #[error("payload truncated: header says {expected} bytes, read {actual}")]
    Truncated { expected: u64, actual: u64 },

    #[error("checksum mismatch: expected 0x{expected:08x}, computed 0x{actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("entry count mismatch: header says {header}, payload holds {payload}")]
    CountMismatch { header: u32, payload: usize },

    #[error("too many entries for one envelope: {0}")]
    TooManyEntries(usize),

    #[error("payload encode failed: {0}")]
    Encode(String),

    #[error("payload decode failed: {0}")]
    Decode(String),
}
