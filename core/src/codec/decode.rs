use num_bigint::BigUint;
use num_traits::Zero;

use crate::codec::alphabet::digit_symbol;
use crate::codec::types::CodecError;
use crate::constants::ESCAPE_DIGIT;

/// Decode a big integer back into `length` symbols' worth of sequence.
///
/// Fails with `CorruptLength` if the number holds more symbols than `length`.
/// A number holding fewer symbols decodes to a shorter sequence; callers that
/// know the exact length compare it themselves.
pub fn decode(number: &BigUint, length: usize) -> Result<Vec<u8>, CodecError> {
    if number.is_zero() {
        return Ok(Vec::new());
    }

    let digits = unpack_nibbles(&number.to_bytes_be());
    let symbols = digits_to_symbols(&digits)?;

    if symbols.len() > length {
        return Err(CodecError::CorruptLength {
            length,
            required: symbols.len(),
        });
    }
    Ok(symbols)
}

/// Hex digits of a non-zero big-endian byte string, without the leading zero nibble.
fn unpack_nibbles(bytes: &[u8]) -> Vec<u8> {
    let mut digits = Vec::with_capacity(bytes.len() * 2);
    for &b in bytes {
        digits.push(b >> 4);
        digits.push(b & 0x0F);
    }
    // to_bytes_be never yields a zero leading byte, so at most one zero nibble leads.
    if digits.first() == Some(&0) {
        digits.remove(0);
    }
    digits
}

fn digits_to_symbols(digits: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut symbols = Vec::with_capacity(digits.len());
    let mut pos = 0;
    while pos < digits.len() {
        let d = digits[pos];
        if d == ESCAPE_DIGIT {
            if pos + 2 >= digits.len() {
                return Err(CodecError::TruncatedEscape { position: pos });
            }
            symbols.push((digits[pos + 1] << 4) | digits[pos + 2]);
            pos += 3;
            continue;
        }
        match digit_symbol(d) {
            Some(s) => symbols.push(s),
            None => return Err(CodecError::InvalidDigit { position: pos, digit: d }),
        }
        pos += 1;
    }
    Ok(symbols)
}
