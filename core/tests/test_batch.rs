mod common;

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use dnasecure_core::chunk_worker::ChunkWorkerError;
    use dnasecure_core::cipher::{AeadCipher, CipherError};
    use dnasecure_core::codec::{encode, FallbackPolicy};
    use dnasecure_core::pipeline::{decrypt_many, encrypt_many, PipelineConfig, SequenceError};
    use dnasecure_core::records::{KeyBundle, LabeledSequence};

    use super::common::{init_tracing, nucleotides, KeyedTestCipher};

    fn config(chunk_size: usize) -> PipelineConfig {
        PipelineConfig::default()
            .with_chunk_size(chunk_size)
            .with_parallel(true)
            .with_max_workers(4)
            .with_inflight_chunks(4)
    }

    fn batch(n: usize) -> Vec<LabeledSequence> {
        (0..n)
            .map(|i| LabeledSequence::new(format!("seq{i}"), nucleotides(50 + i * 37, i as u64)))
            .collect()
    }

    #[test]
    fn test_outputs_follow_input_order_despite_random_delays() {
        init_tracing();
        let cipher = KeyedTestCipher::new().with_random_delay(3);
        let cfg = config(16);
        let inputs = batch(12);

        let enc = encrypt_many(&cipher, &inputs, &cfg).unwrap();
        assert!(enc.all_ok());
        let (records, bundles): (Vec<_>, Vec<_>) = enc.into_outcomes().into_iter().map(Result::unwrap).unzip();

        for (i, (record, bundle)) in records.iter().zip(&bundles).enumerate() {
            assert_eq!(record.label.as_deref(), Some(format!("seq{i}").as_str()));
            assert_eq!(bundle.label, record.label);
            let ordinals: Vec<u32> = record.chunks.iter().map(|c| c.ordinal).collect();
            assert_eq!(ordinals, (0..record.chunks.len() as u32).collect::<Vec<_>>());
        }

        let dec = decrypt_many(&cipher, &records, &bundles, &cfg).unwrap();
        for (input, outcome) in inputs.iter().zip(dec.outcomes) {
            assert_eq!(outcome.unwrap(), input.symbols);
        }
    }

    #[test]
    fn test_failing_sequence_does_not_abort_siblings() {
        let cipher = AeadCipher::default();
        let cfg = config(8).with_fallback(FallbackPolicy::Reject);
        let inputs = vec![
            LabeledSequence::new("good0", nucleotides(40, 1)),
            LabeledSequence::new("bad", b"ACGTACGTACGTxCGT".to_vec()),
            LabeledSequence::new("good2", nucleotides(40, 2)),
        ];

        let report = encrypt_many(&cipher, &inputs, &cfg).unwrap();
        assert_eq!(report.len(), 3);
        assert!(report.outcomes[0].is_ok());
        assert!(report.outcomes[2].is_ok());

        let err = report.outcomes[1].as_ref().unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.label.as_deref(), Some("bad"));
        assert!(matches!(err.source, SequenceError::Chunk { ordinal: 1, .. }));

        assert_eq!(report.telemetry.counters.sequences_ok, 2);
        assert_eq!(report.telemetry.counters.sequences_failed, 1);
    }

    #[test]
    fn test_adapter_failure_fails_only_its_sequence() {
        // "GGGG" encodes to 0x3333
        let poisoned = encode(b"GGGG", FallbackPolicy::Reject).unwrap().value;
        assert_eq!(poisoned, BigUint::from(0x3333u32));
        let cipher = KeyedTestCipher::new().failing_on(poisoned).with_random_delay(1);
        let cfg = config(4);

        let inputs = vec![
            LabeledSequence::unlabeled(b"ACGTACGTACGT".to_vec()),
            LabeledSequence::unlabeled(b"ACGTGGGGACGTACGTACGT".to_vec()),
            LabeledSequence::unlabeled(b"TTTT".to_vec()),
        ];
        let report = encrypt_many(&cipher, &inputs, &cfg).unwrap();

        assert!(report.outcomes[0].is_ok());
        assert!(report.outcomes[2].is_ok());
        let err = report.outcomes[1].as_ref().unwrap_err();
        assert_eq!(
            err.source,
            SequenceError::Chunk {
                ordinal: 1,
                source: ChunkWorkerError::Encryption(CipherError::Failure("poisoned number".into())),
            }
        );
        // 3 + 5 + 1 chunks dispatched; exactly one failed
        let c = &report.telemetry.counters;
        assert_eq!(c.chunks_failed, 1);
        assert_eq!(c.chunks_encrypted + c.chunks_failed, 9);
    }

    #[test]
    fn test_corrupted_chunk_fails_only_its_sequence_on_decrypt() {
        let cipher = AeadCipher::default();
        let cfg = config(10);
        let inputs = batch(4);
        let report = encrypt_many(&cipher, &inputs, &cfg).unwrap();
        let (mut records, bundles): (Vec<_>, Vec<_>) = report.into_outcomes().into_iter().map(Result::unwrap).unzip();

        // corrupt chunk 3 of sequence 2
        let bytes = records[2].chunks[3].record.as_mut_bytes();
        bytes[20] ^= 0x80;

        let dec = decrypt_many(&cipher, &records, &bundles, &cfg).unwrap();
        for (i, outcome) in dec.outcomes.iter().enumerate() {
            if i == 2 {
                let err = outcome.as_ref().unwrap_err();
                assert_eq!(
                    err.source,
                    SequenceError::Chunk {
                        ordinal: 3,
                        source: ChunkWorkerError::ChunkDecryption(CipherError::KeyMismatch),
                    }
                );
            } else {
                assert_eq!(outcome.as_ref().unwrap(), &inputs[i].symbols);
            }
        }
    }

    #[test]
    fn test_missing_and_extra_bundles() {
        let cipher = KeyedTestCipher::new();
        let cfg = config(10);
        let inputs = batch(3);
        let (records, mut bundles): (Vec<_>, Vec<_>) = encrypt_many(&cipher, &inputs, &cfg)
            .unwrap()
            .into_outcomes()
            .into_iter()
            .map(Result::unwrap)
            .unzip();

        // one short: last record has no bundle
        let short = decrypt_many(&cipher, &records, &bundles[..2], &cfg).unwrap();
        assert!(short.outcomes[0].is_ok() && short.outcomes[1].is_ok());
        assert_eq!(short.outcomes[2].as_ref().unwrap_err().source, SequenceError::MissingKeyBundle);

        // one extra: ignored
        bundles.push(KeyBundle::default());
        let extra = decrypt_many(&cipher, &records, &bundles, &cfg).unwrap();
        assert!(extra.all_ok());
        assert_eq!(extra.len(), 3);
    }

    #[test]
    fn test_bundle_with_other_label_is_rejected() {
        let cipher = AeadCipher::default();
        let cfg = config(10);
        let (records, mut bundles): (Vec<_>, Vec<_>) = encrypt_many(&cipher, &batch(2), &cfg)
            .unwrap()
            .into_outcomes()
            .into_iter()
            .map(Result::unwrap)
            .unzip();
        bundles.swap(0, 1);

        let dec = decrypt_many(&cipher, &records, &bundles, &cfg).unwrap();
        assert_eq!(dec.failures().count(), 2);
        assert!(matches!(
            dec.outcomes[0].as_ref().unwrap_err().source,
            SequenceError::LabelMismatch { .. }
        ));
    }

    #[test]
    fn test_records_from_another_adapter_are_refused() {
        let test_cipher = KeyedTestCipher::new();
        let cfg = config(10);
        let (records, bundles): (Vec<_>, Vec<_>) = encrypt_many(&test_cipher, &batch(1), &cfg)
            .unwrap()
            .into_outcomes()
            .into_iter()
            .map(Result::unwrap)
            .unzip();

        let dec = decrypt_many(&AeadCipher::default(), &records, &bundles, &cfg).unwrap();
        assert!(matches!(
            dec.outcomes[0].as_ref().unwrap_err().source,
            SequenceError::CipherMismatch { cipher_id: 0xFFFF }
        ));
    }

    #[test]
    fn test_empty_batch() {
        let cipher = AeadCipher::default();
        let report = encrypt_many(&cipher, &[], &config(10)).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.telemetry.counters.chunks_encrypted, 0);
    }
}
