// ## 📂 File: `src/envelope/encode.rs`
//! src/envelope/encode.rs
//!
//! Design notes:
//! - Header is written field by field, little-endian, in `EnvelopeHeader` order.
//! - Payload is a bincode-serialized `Vec` of entries, guarded by CRC32.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use serde::Serialize;

use crate::envelope::types::{EnvelopeError, EnvelopeFlags, EnvelopeHeader, EnvelopeKind};
use crate::records::{EncryptedSequenceRecord, KeyBundle};
use crate::utils::compute_crc32;

/// Write encrypted sequence records. Returns bytes written.
pub fn write_records<W: Write>(out: &mut W, records: &[EncryptedSequenceRecord]) -> Result<usize, EnvelopeError> {
    let flags = if records.iter().any(|r| r.label.is_some()) {
        EnvelopeFlags::HAS_LABELS
    } else {
        EnvelopeFlags::empty()
    };
    write_envelope(out, EnvelopeKind::Records, flags, records)
}

/// Write key bundles. Keep the result away from the records file.
pub fn write_key_bundles<W: Write>(out: &mut W, bundles: &[KeyBundle]) -> Result<usize, EnvelopeError> {
    let flags = if bundles.iter().any(|b| b.label.is_some()) {
        EnvelopeFlags::HAS_LABELS
    } else {
        EnvelopeFlags::empty()
    };
    write_envelope(out, EnvelopeKind::KeyBundles, flags, bundles)
}

pub fn write_header<W: Write>(out: &mut W, h: &EnvelopeHeader) -> Result<(), EnvelopeError> {
    out.write_all(&h.magic)?;                           // 0..4   magic
    out.write_u16::<LittleEndian>(h.version)?;          // 4..6   version
    out.write_u16::<LittleEndian>(h.flags.bits())?;     // 6..8   flags
    out.write_u32::<LittleEndian>(h.entry_count)?;      // 8..12  entry count
    out.write_u64::<LittleEndian>(h.payload_len)?;      // 12..20 payload length
    out.write_u32::<LittleEndian>(h.crc32)?;            // 20..24 payload CRC32
    Ok(())
}

fn write_envelope<W: Write, T: Serialize>(
    out: &mut W,
    kind: EnvelopeKind,
    flags: EnvelopeFlags,
    entries: &[T],
) -> Result<usize, EnvelopeError> {
    let entry_count = u32::try_from(entries.len()).map_err(|_| EnvelopeError::TooManyEntries(entries.len()))?;

    let payload = bincode::serde::encode_to_vec(entries, bincode::config::standard())
        .map_err(|e| EnvelopeError::Encode(e.to_string()))?;

    let header = EnvelopeHeader::new(kind, flags, entry_count, payload.len() as u64, compute_crc32(&payload));
    write_header(out, &header)?;
    out.write_all(&payload)?;

    tracing::debug!(?kind, entries = entry_count, payload_len = payload.len(), "envelope written");
    Ok(EnvelopeHeader::LEN + payload.len())
}
