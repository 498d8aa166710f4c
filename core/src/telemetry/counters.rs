// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Counters collected while a batch runs.
//!
//! Only the collector thread mutates them; workers report through their results.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub sequences_ok: u64,
    pub sequences_failed: u64,
    pub chunks_encrypted: u64,
    pub chunks_decrypted: u64,
    pub chunks_failed: u64,
    /// Chunk results dropped because their sequence had already failed.
    pub results_discarded: u64,
    pub symbols_in: u64,
    pub symbols_out: u64,
    pub symbols_escaped: u64,
    pub bytes_record: u64,
    pub bytes_key: u64,
}

impl TelemetryCounters {
    /// Record one encrypted chunk.
    ///
    /// - `symbol_len`: symbols in the chunk
    /// - `escaped`: symbols that went through the codec escape
    /// - `record_len`: encrypted record bytes
    /// - `key_len`: key bytes issued for the chunk
    pub fn add_encrypted_chunk(&mut self, symbol_len: usize, escaped: usize, record_len: usize, key_len: usize) {
        self.chunks_encrypted += 1;
        self.symbols_in += symbol_len as u64;
        self.symbols_escaped += escaped as u64;
        self.bytes_record += record_len as u64;
        self.bytes_key += key_len as u64;
    }

    /// Record one decrypted chunk.
    pub fn add_decrypted_chunk(&mut self, symbol_len: usize, record_len: usize) {
        self.chunks_decrypted += 1;
        self.symbols_out += symbol_len as u64;
        self.bytes_record += record_len as u64;
    }

    pub fn add_failed_chunk(&mut self) {
        self.chunks_failed += 1;
    }

    pub fn add_discarded(&mut self) {
        self.results_discarded += 1;
    }

    pub fn add_sequence(&mut self, ok: bool) {
        if ok {
            self.sequences_ok += 1;
        } else {
            self.sequences_failed += 1;
        }
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        *self += other.clone();
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.sequences_ok      += rhs.sequences_ok;
        self.sequences_failed  += rhs.sequences_failed;
        self.chunks_encrypted  += rhs.chunks_encrypted;
        self.chunks_decrypted  += rhs.chunks_decrypted;
        self.chunks_failed     += rhs.chunks_failed;
        self.results_discarded += rhs.results_discarded;

        self.symbols_in        += rhs.symbols_in;
        self.symbols_out       += rhs.symbols_out;
        self.symbols_escaped   += rhs.symbols_escaped;
        self.bytes_record      += rhs.bytes_record;
        self.bytes_key         += rhs.bytes_key;
    }
}
