//! chunk_worker/mod.rs
//! Per-chunk encode+encrypt and decrypt+decode. Chunks never see each other.

pub mod types;
pub mod encrypt;
pub mod decrypt;

pub use types::*;
pub use encrypt::*;
pub use decrypt::*;
