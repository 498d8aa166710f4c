// ## 📂 File: `src/envelope/decode.rs`
//! src/envelope/decode.rs
//!
//! Design notes:
//! - Header is validated before any payload byte is trusted.
//! - Payload is read with `take`, so a corrupt length cannot force a huge allocation up front.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use serde::de::DeserializeOwned;

use crate::constants::ENVELOPE_V1;
use crate::envelope::types::{EnvelopeError, EnvelopeFlags, EnvelopeHeader, EnvelopeKind};
use crate::records::{EncryptedSequenceRecord, KeyBundle};
use crate::utils::compute_crc32;

pub fn read_records<R: Read>(input: &mut R) -> Result<Vec<EncryptedSequenceRecord>, EnvelopeError> {
    read_envelope(input, EnvelopeKind::Records)
}

pub fn read_key_bundles<R: Read>(input: &mut R) -> Result<Vec<KeyBundle>, EnvelopeError> {
    read_envelope(input, EnvelopeKind::KeyBundles)
}

pub fn read_header<R: Read>(input: &mut R) -> Result<EnvelopeHeader, EnvelopeError> {
    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    let version = input.read_u16::<LittleEndian>()?;
    let raw_flags = input.read_u16::<LittleEndian>()?;
    let entry_count = input.read_u32::<LittleEndian>()?;
    let payload_len = input.read_u64::<LittleEndian>()?;
    let crc32 = input.read_u32::<LittleEndian>()?;

    let flags = EnvelopeFlags::from_bits(raw_flags).ok_or(EnvelopeError::UnknownFlags(raw_flags))?;

    Ok(EnvelopeHeader {
        magic,
        version,
        flags,
        entry_count,
        payload_len,
        crc32,
    })
}

pub fn validate_header(h: &EnvelopeHeader, kind: EnvelopeKind) -> Result<(), EnvelopeError> {
    if h.magic != kind.magic() {
        return Err(EnvelopeError::BadMagic {
            expected: kind.magic(),
            found: h.magic,
        });
    }
    if h.version != ENVELOPE_V1 {
        return Err(EnvelopeError::UnsupportedVersion(h.version));
    }
    if h.flags.contains(EnvelopeFlags::KEY_MATERIAL) != kind.required_flags().contains(EnvelopeFlags::KEY_MATERIAL) {
        return Err(EnvelopeError::FlagsMismatch { found: h.flags.bits() });
    }
    Ok(())
}

fn read_envelope<R: Read, T: DeserializeOwned>(input: &mut R, kind: EnvelopeKind) -> Result<Vec<T>, EnvelopeError> {
    let header = read_header(input)?;
    validate_header(&header, kind)?;

    let mut payload = Vec::new();
    input.by_ref().take(header.payload_len).read_to_end(&mut payload)?;
    if payload.len() as u64 != header.payload_len {
        return Err(EnvelopeError::Truncated {
            expected: header.payload_len,
            actual: payload.len() as u64,
        });
    }

    let actual = compute_crc32(&payload);
    if actual != header.crc32 {
        return Err(EnvelopeError::ChecksumMismatch {
            expected: header.crc32,
            actual,
        });
    }

    let (entries, _): (Vec<T>, usize) = bincode::serde::decode_from_slice(&payload, bincode::config::standard())
        .map_err(|e| EnvelopeError::Decode(e.to_string()))?;

    if entries.len() != header.entry_count as usize {
        return Err(EnvelopeError::CountMismatch {
            header: header.entry_count,
            payload: entries.len(),
        });
    }

    tracing::debug!(?kind, entries = entries.len(), "envelope read");
    Ok(entries)
}
