use std::fmt;
use thiserror::Error;

use crate::chunk_worker::ChunkWorkerError;
use crate::records::{EncryptedSequenceRecord, KeyBundle};
use crate::telemetry::TelemetrySnapshot;
use crate::types::ConfigError;

/// Output of encrypting one sequence. Store the two halves separately.
pub type EncryptedPair = (EncryptedSequenceRecord, KeyBundle);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("chunk {ordinal}: {source}")]
    Chunk {
        ordinal: u32,
        #[source]
        source: ChunkWorkerError,
    },

    #[error("key bundle holds {actual} keys but the record has {expected} chunks")]
    KeyBundleSizeMismatch { expected: usize, actual: usize },

    #[error("no key bundle supplied for this record")]
    MissingKeyBundle,

    #[error("key bundle label {bundle:?} does not match record label {record:?}")]
    LabelMismatch {
        record: Option<String>,
        bundle: Option<String>,
    },

    #[error("record was produced by cipher 0x{cipher_id:04x}, which this adapter cannot open")]
    CipherMismatch { cipher_id: u16 },

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("assembled sequence has {actual} symbols, record says {expected}")]
    Assembly { expected: u64, actual: u64 },

    #[error("pipeline error: {0}")]
    Pipeline(String),
}

/// A failed batch item: where it was and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sequence #{index}{}: {source}", label_suffix(.label))]
pub struct BatchItemError {
    pub index: usize,
    pub label: Option<String>,
    #[source]
    pub source: SequenceError,
}

fn label_suffix(label: &Option<String>) -> String {
    match label {
        Some(l) => format!(" ({l})"),
        None => String::new(),
    }
}

/// Per-item outcomes in input order, plus run telemetry.
#[derive(Debug, Clone)]
pub struct BatchReport<T> {
    pub outcomes: Vec<Result<T, BatchItemError>>,
    pub telemetry: TelemetrySnapshot,
}

impl<T> BatchReport<T> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(Result::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchItemError> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn successes(&self) -> impl Iterator<Item = &T> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    pub fn into_outcomes(self) -> Vec<Result<T, BatchItemError>> {
        self.outcomes
    }
}

/// Lifecycle of one sequence inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    Splitting,
    Encrypting,
    Decrypting,
    Assembling,
    Done,
    Failed,
}

impl SequenceState {
    pub fn can_transition(self, next: SequenceState) -> bool {
        use SequenceState::*;
        matches!(
            (self, next),
            (Idle, Splitting)
                | (Splitting, Encrypting)
                | (Splitting, Decrypting)
                | (Splitting, Failed)
                | (Encrypting, Assembling)
                | (Encrypting, Failed)
                | (Decrypting, Assembling)
                | (Decrypting, Failed)
                | (Assembling, Done)
                | (Assembling, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SequenceState::Done | SequenceState::Failed)
    }
}

impl fmt::Display for SequenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SequenceState::Idle       => "idle",
            SequenceState::Splitting  => "splitting",
            SequenceState::Encrypting => "encrypting",
            SequenceState::Decrypting => "decrypting",
            SequenceState::Assembling => "assembling",
            SequenceState::Done       => "done",
            SequenceState::Failed     => "failed",
        };
        f.write_str(name)
    }
}
