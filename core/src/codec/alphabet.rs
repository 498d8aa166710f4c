// ## 📂 File: `src/codec/alphabet.rs`

//! Primary symbol table.
//!
//! Digit 0 is never assigned, which keeps the mapping free of leading zeros.
//! Digit 15 is reserved for the escape.

use crate::constants::ESCAPE_DIGIT;

/// Uppercase nucleotides plus the common IUPAC ambiguity codes.
pub const PRIMARY_SYMBOLS: [(u8, u8); 14] = [
    (b'A', 1),
    (b'C', 2),
    (b'G', 3),
    (b'T', 4),
    (b'N', 5),
    (b'R', 6),
    (b'Y', 7),
    (b'S', 8),
    (b'W', 9),
    (b'K', 10),
    (b'M', 11),
    (b'B', 12),
    (b'D', 13),
    (b'H', 14),
];

const NO_DIGIT: u8 = 0;

const SYMBOL_TO_DIGIT: [u8; 256] = {
    let mut table = [NO_DIGIT; 256];
    let mut i = 0;
    while i < PRIMARY_SYMBOLS.len() {
        let (symbol, digit) = PRIMARY_SYMBOLS[i];
        table[symbol as usize] = digit;
        i += 1;
    }
    table
};

const DIGIT_TO_SYMBOL: [u8; 16] = {
    let mut table = [0u8; 16];
    let mut i = 0;
    while i < PRIMARY_SYMBOLS.len() {
        let (symbol, digit) = PRIMARY_SYMBOLS[i];
        table[digit as usize] = symbol;
        i += 1;
    }
    table
};

/// Single digit for a primary symbol, `None` if it needs the escape.
#[inline]
pub fn symbol_digit(byte: u8) -> Option<u8> {
    match SYMBOL_TO_DIGIT[byte as usize] {
        NO_DIGIT => None,
        d => Some(d),
    }
}

/// Primary symbol for a single digit. Digit 0 and the escape digit have none.
#[inline]
pub fn digit_symbol(digit: u8) -> Option<u8> {
    if digit == NO_DIGIT || digit >= ESCAPE_DIGIT {
        return None;
    }
    Some(DIGIT_TO_SYMBOL[digit as usize])
}
