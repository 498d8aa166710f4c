//! pipeline/sequence.rs
//! Single-sequence entry points. A sequence is a batch of one on the same pool.

use crate::cipher::PrimitiveCipher;
use crate::pipeline::batch::{run_decrypt, run_encrypt, RecordRef, SequenceRef};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::types::{BatchItemError, BatchReport, EncryptedPair, SequenceError};
use crate::records::{EncryptedSequenceRecord, KeyBundle};

/// Split, encode and encrypt one sequence.
///
/// Returns the record and the key bundle as separate values; every chunk has
/// its own key. An empty sequence gives a record with no chunks.
pub fn encrypt_sequence<C>(
    cipher: &C,
    sequence: &[u8],
    config: &PipelineConfig,
) -> Result<EncryptedPair, SequenceError>
where
    C: PrimitiveCipher + ?Sized,
{
    encrypt_labeled_sequence(cipher, None, sequence, config)
}

/// `encrypt_sequence` with a label carried on both the record and the bundle.
pub fn encrypt_labeled_sequence<C>(
    cipher: &C,
    label: Option<&str>,
    sequence: &[u8],
    config: &PipelineConfig,
) -> Result<EncryptedPair, SequenceError>
where
    C: PrimitiveCipher + ?Sized,
{
    let input = [SequenceRef { label, symbols: sequence }];
    single(run_encrypt(cipher, &input, config)?)
}

/// Decrypt every chunk with its own key and reassemble in ordinal order.
pub fn decrypt_sequence<C>(
    cipher: &C,
    record: &EncryptedSequenceRecord,
    key_bundle: &KeyBundle,
    config: &PipelineConfig,
) -> Result<Vec<u8>, SequenceError>
where
    C: PrimitiveCipher + ?Sized,
{
    let input = [RecordRef {
        record,
        bundle: Some(key_bundle),
    }];
    single(run_decrypt(cipher, &input, config)?)
}

fn single<T>(report: BatchReport<T>) -> Result<T, SequenceError> {
    match report.outcomes.into_iter().next() {
        Some(outcome) => outcome.map_err(|e: BatchItemError| e.source),
        None => Err(SequenceError::Pipeline("batch of one produced no outcome".into())),
    }
}
