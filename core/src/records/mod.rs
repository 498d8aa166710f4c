//! records/mod.rs
//! Persistable outputs of the pipeline: per-sequence records and their key bundles.
//!
//! Records and key bundles are separate values and may be stored apart.
//! Neither decrypts anything without the other.

pub mod types;

pub use types::*;
