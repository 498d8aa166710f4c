use num_bigint::BigUint;
use thiserror::Error;

/// What to do with a byte outside the primary alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Carry the raw byte through a two-digit escape. Never loses data.
    #[default]
    Escape,
    /// Refuse the sequence with `CodecError::InvalidSymbol`.
    Reject,
}

/// Output of `encode`: the number plus the metadata needed to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNumber {
    pub value: BigUint,
    /// Symbols encoded. `decode` needs it back.
    pub length: usize,
    /// How many of those symbols went through the escape.
    pub escaped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid symbol 0x{byte:02x} at position {position}")]
    InvalidSymbol { position: usize, byte: u8 },

    #[error("number holds {required} symbols but length is {length}")]
    CorruptLength { length: usize, required: usize },

    #[error("invalid digit {digit} at digit position {position}")]
    InvalidDigit { position: usize, digit: u8 },

    #[error("escape truncated at digit position {position}")]
    TruncatedEscape { position: usize },
}
