#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dnasecure_core::cipher::AeadCipher;
    use dnasecure_core::pipeline::{decrypt_many, encrypt_many, PipelineConfig};
    use dnasecure_core::records::LabeledSequence;
    use dnasecure_core::telemetry::{Stage, StageTimes, TelemetryCounters, TelemetrySnapshot};

    #[test]
    fn test_counters_merge() {
        let mut a = TelemetryCounters::default();
        a.add_encrypted_chunk(10, 2, 40, 32);
        let mut b = TelemetryCounters::default();
        b.add_encrypted_chunk(5, 0, 35, 32);
        b.add_discarded();

        a.merge(&b);
        assert_eq!(a.chunks_encrypted, 2);
        assert_eq!(a.symbols_in, 15);
        assert_eq!(a.symbols_escaped, 2);
        assert_eq!(a.bytes_record, 75);
        assert_eq!(a.bytes_key, 64);
        assert_eq!(a.results_discarded, 1);
    }

    #[test]
    fn test_stage_times_accumulate() {
        let mut t = StageTimes::default();
        t.add(Stage::Encrypt, Duration::from_micros(400));
        t.add(Stage::Encrypt, Duration::from_micros(100));
        t.add(Stage::Encode, Duration::from_micros(20));
        assert_eq!(t.get(Stage::Encrypt), Duration::from_micros(500));
        assert_eq!(t.total(), Duration::from_micros(520));
        assert!(t.has_all(&[Stage::Encode, Stage::Encrypt]));
        assert!(!t.has_all(&[Stage::Decrypt]));
        assert!((t.get_us(Stage::Encrypt) - 500.0).abs() < 1e-6);
        assert!((t.get_ms(Stage::Encode) - 0.02).abs() < 1e-9);
        assert_eq!(t.get_ms(Stage::Decode), 0.0);
    }

    #[test]
    fn test_batch_snapshot_reflects_work() {
        let cipher = AeadCipher::default();
        let cfg = PipelineConfig::default().with_chunk_size(100);
        let inputs = vec![
            LabeledSequence::new("a", b"ACGT".repeat(100)),
            LabeledSequence::new("b", b"acgt".repeat(25)),
        ];

        let enc = encrypt_many(&cipher, &inputs, &cfg).unwrap();
        let snap: TelemetrySnapshot = enc.telemetry.clone();
        assert_eq!(snap.counters.sequences_ok, 2);
        assert_eq!(snap.counters.chunks_encrypted, 5);
        assert_eq!(snap.counters.symbols_in, 500);
        assert_eq!(snap.counters.symbols_escaped, 100);
        assert_eq!(snap.counters.bytes_key, 5 * 32);
        assert!(snap.expansion_ratio > 0.0);

        assert!(snap.has_all_stages(&[Stage::Encode, Stage::Encrypt]));
        assert!(!snap.has_all_stages(&[Stage::Decrypt]));
        assert!(snap.total_stage_time() >= snap.stage_times.get(Stage::Encrypt));

        let record_bytes: usize = enc.successes().map(|(record, _)| record.record_bytes()).sum();
        assert_eq!(record_bytes as u64, snap.counters.bytes_record);
        assert_eq!(enc.successes().count(), 2);

        let json = snap.to_json().unwrap();
        assert!(json.contains("\"chunks_encrypted\":5"));

        let (records, bundles): (Vec<_>, Vec<_>) = enc.into_outcomes().into_iter().map(Result::unwrap).unzip();
        let dec = decrypt_many(&cipher, &records, &bundles, &cfg).unwrap();
        assert_eq!(dec.telemetry.counters.chunks_decrypted, 5);
        assert_eq!(dec.telemetry.counters.symbols_out, 500);
        assert_eq!(dec.telemetry.counters.bytes_record, snap.counters.bytes_record);
        assert!(dec.telemetry.has_all_stages(&[Stage::Decrypt, Stage::Decode]));
        let decrypted: Vec<&Vec<u8>> = dec.successes().collect();
        assert_eq!(decrypted[1], &inputs[1].symbols);
    }
}
