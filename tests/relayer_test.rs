//! Relayer recorder against an in-process relayer

mod common;

use common::{MockRelayer, RelayerBehavior, CONTRACT};
use kudos_core::error::KudosError;
use kudos_core::{
    ChainThenFileRecorder, JsonFileRecorder, PayoutRecorder, PayoutRequest, RelayerRecorder,
};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn request() -> PayoutRequest {
    PayoutRequest::new("0.00007625", "0xabc", "42")
}

#[tokio::test]
async fn test_submits_attestation_and_waits_for_mining() {
    let relayer = MockRelayer::start(RelayerBehavior {
        pending_polls: 2,
        ..Default::default()
    })
    .await;
    let recorder = RelayerRecorder::from_config(&relayer.config()).unwrap();

    let receipt = recorder.record(&request()).await.unwrap();

    assert_eq!(receipt.location, "tx-1");
    assert_eq!(receipt.record.transaction_id.as_deref(), Some("tx-1"));

    let log = relayer.log.lock().unwrap();
    assert_eq!(log.submit_calls, 1);
    assert_eq!(log.poll_calls, 3);

    let body = &log.bodies[0];
    assert_eq!(body["to"], CONTRACT);
    assert_eq!(body["method"], "attestInteraction");
    assert_eq!(body["args"][0], "0xabc");
    assert_eq!(body["args"][1], "42");
    assert_eq!(body["value"], "0.00007625");
    assert_eq!(body["speed"], "fast");
    assert_eq!(log.authorization[0].as_deref(), Some("Bearer test-key"));
}

#[tokio::test]
async fn test_transient_submission_failures_are_retried() {
    let relayer = MockRelayer::start(RelayerBehavior {
        failing_submissions: 2,
        ..Default::default()
    })
    .await;
    let recorder = RelayerRecorder::from_config(&relayer.config()).unwrap();

    recorder.record(&request()).await.unwrap();
    assert_eq!(relayer.submit_calls(), 3);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let relayer = MockRelayer::start(RelayerBehavior {
        failing_submissions: 10,
        ..Default::default()
    })
    .await;
    let recorder = RelayerRecorder::from_config(&relayer.config()).unwrap();

    let err = recorder.record(&request()).await.unwrap_err();
    assert!(matches!(err, KudosError::PersistenceFailure(_)));
    assert_eq!(relayer.submit_calls(), 3);
}

#[tokio::test]
async fn test_client_rejection_is_not_retried() {
    let relayer = MockRelayer::start(RelayerBehavior {
        reject_with: Some(400),
        ..Default::default()
    })
    .await;
    let recorder = RelayerRecorder::from_config(&relayer.config()).unwrap();

    let err = recorder.record(&request()).await.unwrap_err();
    match err {
        KudosError::PersistenceFailure(msg) => assert!(msg.contains("400")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(relayer.submit_calls(), 1);
}

#[tokio::test]
async fn test_failed_transaction() {
    let relayer = MockRelayer::start(RelayerBehavior {
        final_status: "failed",
        ..Default::default()
    })
    .await;
    let recorder = RelayerRecorder::from_config(&relayer.config()).unwrap();

    let err = recorder.record(&request()).await.unwrap_err();
    assert!(matches!(err, KudosError::PersistenceFailure(_)));
}

#[tokio::test]
async fn test_confirmation_timeout() {
    let relayer = MockRelayer::start(RelayerBehavior {
        pending_polls: u32::MAX,
        ..Default::default()
    })
    .await;
    let mut config = relayer.config();
    config.confirmation_timeout_secs = 1;
    let recorder = RelayerRecorder::from_config(&config).unwrap();

    let err = recorder.record(&request()).await.unwrap_err();
    match err {
        KudosError::ConfirmationTimeout { transaction_id, .. } => {
            assert_eq!(transaction_id, "tx-1")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_stalled_lookup_respects_confirmation_timeout() {
    let relayer = MockRelayer::start(RelayerBehavior {
        lookup_delay: Some(Duration::from_secs(12)),
        ..Default::default()
    })
    .await;
    let mut config = relayer.config();
    config.confirmation_timeout_secs = 1;
    let recorder = RelayerRecorder::from_config(&config).unwrap();

    let started = Instant::now();
    let err = recorder.record(&request()).await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(
        matches!(err, KudosError::ConfirmationTimeout { ref transaction_id, .. } if transaction_id == "tx-1"),
        "unexpected error: {:?}",
        err
    );
    assert!(elapsed < Duration::from_secs(3), "waited {:?}", elapsed);
}

#[tokio::test]
async fn test_chain_then_file_records_transaction_id() {
    let relayer = MockRelayer::start(RelayerBehavior::default()).await;
    let dir = TempDir::new().unwrap();
    let file = JsonFileRecorder::new(dir.path().join("payouts.json"));
    let recorder = ChainThenFileRecorder::new(
        RelayerRecorder::from_config(&relayer.config()).unwrap(),
        file,
    );

    let receipt = recorder.record(&request()).await.unwrap();
    assert_eq!(receipt.location, "tx-1");

    let stored = JsonFileRecorder::new(dir.path().join("payouts.json"))
        .list()
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].transaction_id.as_deref(), Some("tx-1"));
    assert_eq!(stored[0].incentive, "0.00007625");
}

#[tokio::test]
async fn test_unreachable_relayer_fails_after_retries() {
    let relayer = MockRelayer::start(RelayerBehavior::default()).await;
    let mut config = relayer.config();
    // Nothing listens on the discard port
    config.url = Some("http://127.0.0.1:9".to_string());
    let recorder = RelayerRecorder::from_config(&config).unwrap();

    let err = recorder.record(&request()).await.unwrap_err();
    assert!(matches!(err, KudosError::PersistenceFailure(_)));
}
