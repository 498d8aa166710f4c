//! pipeline/batch.rs
//! Batch encrypt/decrypt over one shared chunk pool.
//!
//! Every chunk of every sequence goes through the same bounded queue, so a
//! batch of many short sequences and a single long one are scheduled alike.
//! Outcomes come back in input order, one per sequence, whatever order the
//! chunks finished in.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::chunk_worker::{
    ChunkWorkerError, DecryptChunkInput, DecryptChunkWorker, DecryptedChunk, EncryptChunkWorker,
    EncryptedChunkOutput,
};
use crate::chunking::{join, split, Chunk};
use crate::cipher::PrimitiveCipher;
use crate::pipeline::assemble::{Accepted, SequenceSlot};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::types::{BatchItemError, BatchReport, EncryptedPair, SequenceError, SequenceState};
use crate::records::{EncryptedChunk, EncryptedSequenceRecord, KeyBundle, LabeledSequence};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::ConfigError;

/// Borrowed view of one sequence to encrypt.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SequenceRef<'a> {
    pub label: Option<&'a str>,
    pub symbols: &'a [u8],
}

/// One record to decrypt, with the bundle it was paired with (if any).
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecordRef<'a> {
    pub record: &'a EncryptedSequenceRecord,
    pub bundle: Option<&'a KeyBundle>,
}

struct ChunkTask<'a> {
    seq: usize,
    chunk: Chunk<'a>,
}

struct DecryptTask<'a> {
    seq: usize,
    input: DecryptChunkInput<'a>,
}

struct TaskResult<T> {
    seq: usize,
    ordinal: u32,
    result: Result<T, ChunkWorkerError>,
}

/// Encrypt each sequence independently.
///
/// A failing sequence never aborts its siblings: its slot in the report holds
/// the error, the others hold their record and key bundle. Only an invalid
/// config fails the whole call.
pub fn encrypt_many<C>(
    cipher: &C,
    sequences: &[LabeledSequence],
    config: &PipelineConfig,
) -> Result<BatchReport<EncryptedPair>, ConfigError>
where
    C: PrimitiveCipher + ?Sized,
{
    let refs: Vec<SequenceRef<'_>> = sequences
        .iter()
        .map(|s| SequenceRef {
            label: s.label.as_deref(),
            symbols: &s.symbols,
        })
        .collect();
    run_encrypt(cipher, &refs, config)
}

/// Decrypt records with the key bundle at the same position.
///
/// A record without a bundle fails with `MissingKeyBundle`. Extra bundles are ignored.
pub fn decrypt_many<C>(
    cipher: &C,
    records: &[EncryptedSequenceRecord],
    key_bundles: &[KeyBundle],
    config: &PipelineConfig,
) -> Result<BatchReport<Vec<u8>>, ConfigError>
where
    C: PrimitiveCipher + ?Sized,
{
    if key_bundles.len() > records.len() {
        warn!(
            records = records.len(),
            bundles = key_bundles.len(),
            "more key bundles than records, extras ignored"
        );
    }
    let refs: Vec<RecordRef<'_>> = records
        .iter()
        .enumerate()
        .map(|(i, record)| RecordRef {
            record,
            bundle: key_bundles.get(i),
        })
        .collect();
    run_decrypt(cipher, &refs, config)
}

// ============================================================
// Encrypt
// ============================================================
pub(crate) fn run_encrypt<C>(
    cipher: &C,
    sequences: &[SequenceRef<'_>],
    config: &PipelineConfig,
) -> Result<BatchReport<EncryptedPair>, ConfigError>
where
    C: PrimitiveCipher + ?Sized,
{
    config.validate()?;

    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();
    let pool = config.pool();

    info!(
        sequences = sequences.len(),
        chunk_size = config.chunk_size,
        workers = pool.workers(),
        "encrypt batch start"
    );

    // ---- Split ----
    let split_start = Instant::now();
    let mut slots: Vec<SequenceSlot<'_, EncryptedChunkOutput>> = Vec::with_capacity(sequences.len());
    let mut tasks: Vec<ChunkTask<'_>> = Vec::new();

    for (seq, input) in sequences.iter().enumerate() {
        let mut slot = SequenceSlot::new(seq, input.label);
        slot.transition(SequenceState::Splitting);
        match split(input.symbols, config.chunk_size) {
            Ok(chunks) => {
                debug!(sequence = seq, symbols = input.symbols.len(), chunks = chunks.len(), "sequence split");
                slot.expect_chunks(chunks.len());
                slot.transition(SequenceState::Encrypting);
                tasks.extend(chunks.into_iter().map(|chunk| ChunkTask { seq, chunk }));
            }
            Err(e) => slot.fail(SequenceError::Config(e)),
        }
        slots.push(slot);
    }
    timer.add_stage_time(Stage::Split, split_start.elapsed());

    // ---- Chunks ----
    let worker = EncryptChunkWorker::new(cipher, config.fallback);
    pool.run(
        tasks,
        |task: ChunkTask<'_>| TaskResult {
            seq: task.seq,
            ordinal: task.chunk.ordinal,
            result: worker.encrypt_chunk(&task.chunk),
        },
        |res: TaskResult<EncryptedChunkOutput>| {
            if let Ok(out) = &res.result {
                counters.add_encrypted_chunk(out.symbol_len as usize, out.escaped, out.record.len(), out.key.len());
                timer.stage_times.merge(&out.stage_times);
            } else {
                counters.add_failed_chunk();
            }
            let slot = &mut slots[res.seq];
            if slot.accept(res.ordinal, res.result) == Accepted::Discarded {
                counters.add_discarded();
                warn!(sequence = res.seq, ordinal = res.ordinal, "discarding chunk result of failed sequence");
            }
        },
    );

    // ---- Assemble ----
    let assemble_start = Instant::now();
    let outcomes: Vec<Result<EncryptedPair, BatchItemError>> = slots
        .iter_mut()
        .zip(sequences)
        .map(|(slot, input)| {
            let result = slot
                .finish()
                .map(|outputs| assemble_encrypted(cipher.suite_id(), config.chunk_size, input, outputs));
            finish_outcome(slot, result, &mut counters)
        })
        .collect();
    timer.add_stage_time(Stage::Assemble, assemble_start.elapsed());

    Ok(finish_report(outcomes, counters, timer, "encrypt"))
}

fn assemble_encrypted(
    cipher_id: u16,
    chunk_size: usize,
    input: &SequenceRef<'_>,
    outputs: Vec<EncryptedChunkOutput>,
) -> EncryptedPair {
    let mut chunks = Vec::with_capacity(outputs.len());
    let mut keys = Vec::with_capacity(outputs.len());
    for out in outputs {
        chunks.push(EncryptedChunk {
            ordinal: out.ordinal,
            symbol_len: out.symbol_len,
            record: out.record,
        });
        keys.push(out.key);
    }

    let label = input.label.map(str::to_owned);
    let record = EncryptedSequenceRecord {
        label: label.clone(),
        total_len: input.symbols.len() as u64,
        chunk_size: chunk_size as u32,
        cipher_id,
        chunks,
    };
    (record, KeyBundle::new(label, keys))
}

// ============================================================
// Decrypt
// ============================================================
pub(crate) fn run_decrypt<C>(
    cipher: &C,
    records: &[RecordRef<'_>],
    config: &PipelineConfig,
) -> Result<BatchReport<Vec<u8>>, ConfigError>
where
    C: PrimitiveCipher + ?Sized,
{
    config.validate()?;

    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();
    let pool = config.pool();

    info!(records = records.len(), workers = pool.workers(), "decrypt batch start");

    // ---- Validate and dispatch ----
    let validate_start = Instant::now();
    let mut slots: Vec<SequenceSlot<'_, DecryptedChunk>> = Vec::with_capacity(records.len());
    let mut tasks: Vec<DecryptTask<'_>> = Vec::new();

    for (seq, pair) in records.iter().enumerate() {
        let mut slot = SequenceSlot::new(seq, pair.record.label.as_deref());
        slot.transition(SequenceState::Splitting);
        match validate_pair(cipher, pair) {
            Ok(bundle) => {
                slot.expect_chunks(pair.record.chunks.len());
                slot.transition(SequenceState::Decrypting);
                tasks.extend(pair.record.chunks.iter().zip(&bundle.keys).map(|(chunk, key)| DecryptTask {
                    seq,
                    input: DecryptChunkInput {
                        ordinal: chunk.ordinal,
                        record: &chunk.record,
                        key,
                        expected_len: chunk.symbol_len as usize,
                    },
                }));
            }
            Err(e) => slot.fail(e),
        }
        slots.push(slot);
    }
    timer.add_stage_time(Stage::Validate, validate_start.elapsed());

    // ---- Chunks ----
    let worker = DecryptChunkWorker::new(cipher);
    pool.run(
        tasks,
        |task: DecryptTask<'_>| TaskResult {
            seq: task.seq,
            ordinal: task.input.ordinal,
            result: worker.decrypt_chunk(&task.input),
        },
        |res: TaskResult<DecryptedChunk>| {
            if let Ok(out) = &res.result {
                counters.add_decrypted_chunk(out.symbols.len(), out.record_len);
                timer.stage_times.merge(&out.stage_times);
            } else {
                counters.add_failed_chunk();
            }
            let slot = &mut slots[res.seq];
            if slot.accept(res.ordinal, res.result) == Accepted::Discarded {
                counters.add_discarded();
                warn!(sequence = res.seq, ordinal = res.ordinal, "discarding chunk result of failed sequence");
            }
        },
    );

    // ---- Assemble ----
    let assemble_start = Instant::now();
    let outcomes: Vec<Result<Vec<u8>, BatchItemError>> = slots
        .iter_mut()
        .zip(records)
        .map(|(slot, pair)| {
            let result = slot.finish().and_then(|chunks| {
                let symbols = join(&chunks);
                if symbols.len() as u64 != pair.record.total_len {
                    return Err(SequenceError::Assembly {
                        expected: pair.record.total_len,
                        actual: symbols.len() as u64,
                    });
                }
                Ok(symbols)
            });
            finish_outcome(slot, result, &mut counters)
        })
        .collect();
    timer.add_stage_time(Stage::Assemble, assemble_start.elapsed());

    Ok(finish_report(outcomes, counters, timer, "decrypt"))
}

/// Checks that need no key material. Returns the bundle to decrypt with.
fn validate_pair<'a, C>(cipher: &C, pair: &RecordRef<'a>) -> Result<&'a KeyBundle, SequenceError>
where
    C: PrimitiveCipher + ?Sized,
{
    let record = pair.record;
    let bundle = pair.bundle.ok_or(SequenceError::MissingKeyBundle)?;

    if let (Some(r), Some(b)) = (&record.label, &bundle.label) {
        if r != b {
            return Err(SequenceError::LabelMismatch {
                record: record.label.clone(),
                bundle: bundle.label.clone(),
            });
        }
    }

    if !record.chunks.is_empty() && !cipher.accepts(record.cipher_id) {
        return Err(SequenceError::CipherMismatch {
            cipher_id: record.cipher_id,
        });
    }

    if bundle.len() != record.chunks.len() {
        return Err(SequenceError::KeyBundleSizeMismatch {
            expected: record.chunks.len(),
            actual: bundle.len(),
        });
    }

    let chunk_size = record.chunk_size;
    for (position, chunk) in record.chunks.iter().enumerate() {
        if chunk.ordinal as usize != position {
            return Err(SequenceError::MalformedRecord(format!(
                "chunk at position {position} carries ordinal {}",
                chunk.ordinal
            )));
        }
        if chunk.symbol_len == 0 || chunk.symbol_len > chunk_size {
            return Err(SequenceError::MalformedRecord(format!(
                "chunk {} claims {} symbols with chunk size {chunk_size}",
                chunk.ordinal, chunk.symbol_len
            )));
        }
    }

    Ok(bundle)
}

// ============================================================
// Shared tail
// ============================================================
fn finish_outcome<T>(
    slot: &mut SequenceSlot<'_, impl Sized>,
    result: Result<T, SequenceError>,
    counters: &mut TelemetryCounters,
) -> Result<T, BatchItemError> {
    slot.complete(result.is_ok());
    counters.add_sequence(result.is_ok());
    result.map_err(|source| {
        error!(sequence = slot.index, label = ?slot.label, error = %source, "sequence failed");
        BatchItemError {
            index: slot.index,
            label: slot.label.map(str::to_owned),
            source,
        }
    })
}

fn finish_report<T>(
    outcomes: Vec<Result<T, BatchItemError>>,
    counters: TelemetryCounters,
    mut timer: TelemetryTimer,
    op: &'static str,
) -> BatchReport<T> {
    timer.finish();
    let telemetry = TelemetrySnapshot::from(&counters, &timer);
    info!(
        op,
        ok = counters.sequences_ok,
        failed = counters.sequences_failed,
        chunks_failed = counters.chunks_failed,
        discarded = counters.results_discarded,
        elapsed_ms = telemetry.elapsed.as_millis() as u64,
        "batch finished"
    );
    BatchReport { outcomes, telemetry }
}
