use num_bigint::BigUint;

use crate::codec::alphabet::symbol_digit;
use crate::codec::types::{CodecError, FallbackPolicy, SequenceNumber};
use crate::constants::ESCAPE_DIGIT;

/// Encode a symbol sequence into a big integer.
///
/// Digits are read most significant first. The empty sequence encodes to zero.
pub fn encode(sequence: &[u8], policy: FallbackPolicy) -> Result<SequenceNumber, CodecError> {
    let digits = sequence_digits(sequence, policy)?;
    let escaped = (digits.len() - sequence.len()) / 2;

    Ok(SequenceNumber {
        value: BigUint::from_bytes_be(&pack_nibbles(&digits)),
        length: sequence.len(),
        escaped,
    })
}

/// Hex digits for a sequence, escapes expanded.
fn sequence_digits(sequence: &[u8], policy: FallbackPolicy) -> Result<Vec<u8>, CodecError> {
    let mut digits = Vec::with_capacity(sequence.len());
    for (position, &byte) in sequence.iter().enumerate() {
        match symbol_digit(byte) {
            Some(d) => digits.push(d),
            None => match policy {
                FallbackPolicy::Escape => {
                    digits.push(ESCAPE_DIGIT);
                    digits.push(byte >> 4);
                    digits.push(byte & 0x0F);
                }
                FallbackPolicy::Reject => {
                    return Err(CodecError::InvalidSymbol { position, byte });
                }
            },
        }
    }
    Ok(digits)
}

/// Pack hex digits two per byte. An odd count gets a leading zero nibble,
/// which leaves the numeric value unchanged.
fn pack_nibbles(digits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((digits.len() + 1) / 2);
    let (head, rest) = if digits.len() % 2 == 1 {
        (Some(digits[0]), &digits[1..])
    } else {
        (None, digits)
    };
    if let Some(d) = head {
        bytes.push(d);
    }
    for pair in rest.chunks_exact(2) {
        bytes.push((pair[0] << 4) | pair[1]);
    }
    bytes
}
