//! chunking/mod.rs
//! Splits a sequence into fixed-size, ordered chunks and joins them back.

pub mod types;
pub mod split;

pub use types::*;
pub use split::*;
