// ================= Ordered assembly =================

use std::collections::BTreeMap;

use crate::chunk_worker::ChunkWorkerError;
use crate::pipeline::types::{SequenceError, SequenceState};

/// What happened to a chunk result handed to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    Stored,
    /// This result failed the sequence.
    Failed,
    /// The sequence had already failed; the result was dropped.
    Discarded,
}

/// Per-sequence collector. Chunk results arrive in any order and are keyed by
/// ordinal; the first failure wins and later results for the sequence are dropped.
#[derive(Debug)]
pub struct SequenceSlot<'a, T> {
    pub index: usize,
    pub label: Option<&'a str>,
    expected: usize,
    pending: BTreeMap<u32, T>,
    state: SequenceState,
    error: Option<SequenceError>,
}

impl<'a, T> SequenceSlot<'a, T> {
    pub fn new(index: usize, label: Option<&'a str>) -> Self {
        Self {
            index,
            label,
            expected: 0,
            pending: BTreeMap::new(),
            state: SequenceState::Idle,
            error: None,
        }
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn transition(&mut self, next: SequenceState) {
        debug_assert!(
            self.state.can_transition(next),
            "illegal sequence transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!(sequence = self.index, from = %self.state, to = %next, "sequence state");
        self.state = next;
    }

    /// Chunks this sequence is waiting for.
    pub fn expect_chunks(&mut self, chunks: usize) {
        self.expected = chunks;
    }

    /// Fail the sequence. Only the first error is kept.
    pub fn fail(&mut self, error: SequenceError) {
        if self.error.is_some() {
            return;
        }
        self.error = Some(error);
        self.pending.clear();
        if !self.state.is_terminal() {
            self.transition(SequenceState::Failed);
        }
    }

    pub fn accept(&mut self, ordinal: u32, result: Result<T, ChunkWorkerError>) -> Accepted {
        if self.is_failed() {
            return Accepted::Discarded;
        }
        match result {
            Ok(value) => {
                self.pending.insert(ordinal, value);
                Accepted::Stored
            }
            Err(source) => {
                self.fail(SequenceError::Chunk { ordinal, source });
                Accepted::Failed
            }
        }
    }

    /// Drain the chunks in ordinal order, checking every ordinal arrived exactly once.
    pub fn finish(&mut self) -> Result<Vec<T>, SequenceError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.transition(SequenceState::Assembling);

        if self.pending.len() != self.expected {
            let err = SequenceError::Pipeline(format!(
                "collected {} of {} chunk results",
                self.pending.len(),
                self.expected
            ));
            self.transition(SequenceState::Failed);
            return Err(err);
        }

        let pending = std::mem::take(&mut self.pending);
        let mut ordered = Vec::with_capacity(pending.len());
        for (position, (ordinal, value)) in pending.into_iter().enumerate() {
            if ordinal as usize != position {
                self.transition(SequenceState::Failed);
                return Err(SequenceError::Pipeline(format!(
                    "chunk ordinal {ordinal} found at position {position}"
                )));
            }
            ordered.push(value);
        }
        Ok(ordered)
    }

    pub fn complete(&mut self, ok: bool) {
        if ok {
            self.transition(SequenceState::Done);
        } else if !self.state.is_terminal() {
            self.transition(SequenceState::Failed);
        }
    }
}
