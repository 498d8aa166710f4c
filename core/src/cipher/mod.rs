//! cipher/mod.rs
//! Primitive cipher seam and the default per-chunk AEAD adapter.

pub mod types;
pub mod aead;
pub mod adapter;

pub use types::*;
pub use aead::*;
pub use adapter::*;
