//! envelope/mod.rs
//! Binary archives for encrypted records and for key bundles.
//!
//! Layout (both kinds):
//! ```text
//! [magic 4][version u16][flags u16][entry_count u32][payload_len u64][crc32 u32][payload]
//! ```
//! "DSR1" files hold records, "DSK1" files hold keys.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
