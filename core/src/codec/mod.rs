//! codec/mod.rs
//! Bijective mapping between symbol sequences and non-negative big integers.
//!
//! Notes:
//! - Every symbol maps to a non-zero hex digit, so no leading zero can be lost.
//! - Decoding always takes the symbol count, stored alongside the ciphertext.
//! - Bytes outside the primary alphabet travel through a two-digit escape.

pub mod alphabet;
pub mod types;
pub mod encode;
pub mod decode;

pub use alphabet::*;
pub use types::*;
pub use encode::*;
pub use decode::*;
