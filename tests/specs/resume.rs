//! Crash-recovery-by-replay behavior

use crate::prelude::*;
use packbox_engine::ScanOutcome;
use packbox_storage::{log_path, resolve};

#[tokio::test]
async fn fresh_start_begins_at_box_one() {
    let dir = tempfile::tempdir().unwrap();
    let handle = start(test_config(&dir, 3), true);

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.box_number, 1);
    assert_eq!(stats.items_in_current_box, 0);
    assert_eq!(stats.total_accepted, 0);
    assert_eq!(handle.suffix(), 1);
}

#[tokio::test]
async fn killing_after_any_record_resumes_identically() {
    // For every prefix length i, a process killed right after record i
    // and resumed must hold the state the continuous process held
    let all_codes = codes(7);

    for i in 1..=all_codes.len() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir, 3);

        let stats_before = {
            let handle = start(config.clone(), false);
            for code in &all_codes[..i] {
                handle.accept(code.clone()).await.unwrap();
            }
            let stats = handle.stats().await.unwrap();
            // Simulate a kill: drop the handle without shutdown. Every
            // append was fsync'd, so the log is already durable.
            drop(handle);
            stats
        };

        let handle = start(config, true);
        assert_eq!(handle.stats().await.unwrap(), stats_before, "prefix {i}");

        // Dedup set was reconstructed too
        for code in &all_codes[..i] {
            assert!(
                matches!(
                    handle.accept(code.clone()).await.unwrap(),
                    ScanOutcome::Duplicate { .. }
                ),
                "prefix {i}: {code} must stay duplicate after resume"
            );
        }
    }
}

#[tokio::test]
async fn resume_restores_partial_box_contents() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, 3);

    {
        let handle = start(config.clone(), false);
        for code in ["AAA", "BBB", "CCC", "DDD", "EEE"] {
            handle.accept(code).await.unwrap();
        }
        handle.shutdown().await.unwrap();
    }

    // Last box had 2/3 items: restored as-is, not rolled over
    let handle = start(config, true);
    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.box_number, 2);
    assert_eq!(stats.items_in_current_box, 2);

    let snapshot = handle.export_snapshot().await.unwrap();
    let box2: Vec<_> = snapshot
        .iter()
        .filter(|r| r.box_number == 2)
        .map(|r| r.code.as_str())
        .collect();
    assert_eq!(box2, ["DDD", "EEE"]);
}

#[tokio::test]
async fn resume_rolls_over_when_last_box_was_full() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, 3);

    {
        let handle = start(config.clone(), false);
        for code in ["AAA", "BBB", "CCC"] {
            handle.accept(code).await.unwrap();
        }
        handle.shutdown().await.unwrap();
    }

    let handle = start(config, true);
    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.box_number, 2);
    assert_eq!(stats.items_in_current_box, 0);
    assert_eq!(stats.total_accepted, 3);
}

#[tokio::test]
async fn corrupt_log_starts_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, 3);

    {
        let handle = start(config.clone(), false);
        handle.accept("AAA").await.unwrap();
        handle.shutdown().await.unwrap();
    }

    // Flip a byte inside the only record
    let path = log_path(&config.data_dir, 1);
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replace("AAA", "XXX")).unwrap();

    let handle = start(config, true);
    assert_eq!(handle.suffix(), 2);
    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.total_accepted, 0);

    // The damaged artifact is left in place, never repaired in-band
    assert!(path.exists());
}

#[tokio::test]
async fn new_sessions_get_strictly_increasing_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir, 3);

    for expected in 1..=3u32 {
        let handle = start(config.clone(), false);
        assert_eq!(handle.suffix(), expected);
        handle.accept(format!("code-{expected}")).await.unwrap();
        handle.shutdown().await.unwrap();
    }

    // Resume targets the highest suffix
    let resolution = resolve(&config.data_dir, true).unwrap();
    assert_eq!(resolution.suffix, 3);
    assert_eq!(resolution.records.len(), 1);
}
