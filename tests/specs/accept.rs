//! Acceptance, validation, and duplicate-rejection behavior

use crate::prelude::*;
use packbox_core::RejectReason;
use packbox_engine::ScanOutcome;
use packbox_storage::LogReader;
use std::collections::HashMap;

#[tokio::test]
async fn item_i_lands_in_box_ceil_i_over_k() {
    let dir = tempfile::tempdir().unwrap();
    let capacity = 3u32;
    let handle = start(test_config(&dir, capacity), false);

    for (i, code) in codes(10).into_iter().enumerate() {
        let i = i as u32 + 1; // 1-indexed
        let outcome = handle.accept(code.clone()).await.unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Accepted {
                box_number: i.div_ceil(capacity),
                code,
            }
        );
    }

    // No box ever holds more than K codes
    let mut per_box: HashMap<u32, usize> = HashMap::new();
    for row in handle.export_snapshot().await.unwrap() {
        *per_box.entry(row.box_number).or_default() += 1;
    }
    assert!(per_box.values().all(|&n| n <= capacity as usize));
    assert_eq!(per_box.len(), 4);
}

#[tokio::test]
async fn scenario_capacity_three() {
    let dir = tempfile::tempdir().unwrap();
    let handle = start(test_config(&dir, 3), false);

    // A, B, C fill box 1 and trigger rollover; D lands in box 2
    for (code, expected_box) in [("AAA", 1), ("BBB", 1), ("CCC", 1), ("DDD", 2)] {
        let outcome = handle.accept(code).await.unwrap();
        assert!(matches!(
            outcome,
            ScanOutcome::Accepted { box_number, .. } if box_number == expected_box
        ));
    }

    let snapshot = handle.export_snapshot().await.unwrap();
    let box1: Vec<_> = snapshot
        .iter()
        .filter(|r| r.box_number == 1)
        .map(|r| r.code.as_str())
        .collect();
    let box2: Vec<_> = snapshot
        .iter()
        .filter(|r| r.box_number == 2)
        .map(|r| r.code.as_str())
        .collect();
    assert_eq!(box1, ["AAA", "BBB", "CCC"]);
    assert_eq!(box2, ["DDD"]);

    // B again is a duplicate
    assert_eq!(
        handle.accept("BBB").await.unwrap(),
        ScanOutcome::Duplicate {
            code: "BBB".to_string()
        }
    );

    // Empty input fails validation
    assert_eq!(
        handle.accept("").await.unwrap(),
        ScanOutcome::Rejected {
            reason: RejectReason::EmptyCode
        }
    );
}

#[tokio::test]
async fn rejections_leave_the_log_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let handle = start(test_config(&dir, 3), false);

    handle.accept("AAA").await.unwrap();
    handle.accept("").await.unwrap(); // empty
    handle.accept("xy").await.unwrap(); // too short
    handle.accept("AAA").await.unwrap(); // duplicate

    let records = LogReader::open_or_empty(handle.log_path())
        .replay()
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, "AAA");
}
