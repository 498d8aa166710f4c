//! pipeline/mod.rs
//! Sequence orchestration and batch driving.
//!
//! Flow per sequence:
//! ```text
//! Idle -> Splitting -> Encrypting|Decrypting (chunks on the pool) -> Assembling -> Done
//!                 \______________________\__________________________\-> Failed
//! ```

pub mod types;
pub mod config;
pub mod parallelism;
pub mod pool;
pub mod assemble;
pub mod batch;
pub mod sequence;

pub use types::*;
pub use config::*;
pub use parallelism::*;
pub use pool::*;
pub use batch::{decrypt_many, encrypt_many};
pub use sequence::*;
