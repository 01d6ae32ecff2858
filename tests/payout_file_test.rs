//! JSON payout file round trips

use kudos_core::{calculate_incentive, JsonFileRecorder, PayoutRecorder, PayoutRequest};
use tempfile::TempDir;

#[tokio::test]
async fn test_round_trip_preserves_decimal_text() {
    let dir = TempDir::new().unwrap();
    let recorder = JsonFileRecorder::new(dir.path().join("payouts.json"));

    let amounts: Vec<String> = [1.0, 21.0, 50.0, 76.25, 100.0]
        .iter()
        .map(|s| calculate_incentive(*s).unwrap().to_decimal_string())
        .collect();

    for (i, amount) in amounts.iter().enumerate() {
        recorder
            .record(&PayoutRequest::new(
                amount.clone(),
                format!("0x{:040x}", i),
                format!("service-{}", i),
            ))
            .await
            .unwrap();
    }

    let records = recorder.list().await.unwrap();
    assert_eq!(records.len(), amounts.len());
    for (i, (record, amount)) in records.iter().zip(&amounts).enumerate() {
        assert_eq!(&record.incentive, amount);
        assert_eq!(record.recipient_address, format!("0x{:040x}", i));
        assert_eq!(record.service_id, format!("service-{}", i));
        assert!(!record.incentive.contains('e'));
    }
}

#[tokio::test]
async fn test_appends_after_legacy_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payouts.json");
    std::fs::write(
        &path,
        r#"[
  {"incentive": "0.000001", "userAddress": "0xold", "serviceId": "1"},
  {"incentive": "0.00002", "clientWallet": "0xolder", "serviceId": "2"}
]"#,
    )
    .unwrap();

    let recorder = JsonFileRecorder::new(&path);
    recorder
        .record(&PayoutRequest::new("0.0001", "0xnew", "3"))
        .await
        .unwrap();

    let records = recorder.list().await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].recipient_address, "0xold");
    assert_eq!(records[1].recipient_address, "0xolder");
    assert_eq!(records[2].recipient_address, "0xnew");

    // Rewritten under the canonical name
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("userAddress"));
    assert!(!raw.contains("clientWallet"));
    assert_eq!(raw.matches("recipientAddress").count(), 3);
}

#[tokio::test]
async fn test_no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let recorder = JsonFileRecorder::new(dir.path().join("payouts.json"));

    recorder
        .record(&PayoutRequest::new("0.00005", "0xabc", "1"))
        .await
        .unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["payouts.json".to_string()]);
}
