//! Common test utilities and helpers

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use kudos_core::config::RelayerConfig;
use kudos_core::{FeedbackPipeline, FeedbackSubmission, HelpfulnessScorer, JsonFileRecorder};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// 16 words, 2 adjectives, 0 adverbs, 4 noun phrases; helpfulness 76.25
pub const REFERENCE_REVIEW: &str =
    "This product has a bug and the design quality is poor, I would recommend better materials.";

pub const CONTRACT: &str = "0x1B9ec5Cc45977927fe6707f2A02F51e1415f2052";

/// Pipeline writing to `payouts.json` inside a fresh temp dir
pub fn file_pipeline() -> (FeedbackPipeline, PathBuf, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("payouts.json");
    let pipeline = FeedbackPipeline::new(
        HelpfulnessScorer::default(),
        Arc::new(JsonFileRecorder::new(&path)),
    );
    (pipeline, path, dir)
}

pub fn submission(text: &str, recipient: &str, service: &str) -> FeedbackSubmission {
    FeedbackSubmission {
        review_text: text.to_string(),
        recipient_address: recipient.to_string(),
        service_id: service.to_string(),
    }
}

/// How the fake relayer answers
#[derive(Debug, Clone)]
pub struct RelayerBehavior {
    /// Submissions answered with 503 before one succeeds
    pub failing_submissions: u32,
    /// Polls answered "pending" before the final status
    pub pending_polls: u32,
    pub final_status: &'static str,
    /// Reject every submission with this status
    pub reject_with: Option<u16>,
    /// Hold every lookup this long before answering
    pub lookup_delay: Option<Duration>,
}

impl Default for RelayerBehavior {
    fn default() -> Self {
        Self {
            failing_submissions: 0,
            pending_polls: 1,
            final_status: "mined",
            reject_with: None,
            lookup_delay: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct RelayerLog {
    pub submit_calls: u32,
    pub poll_calls: u32,
    pub bodies: Vec<Value>,
    pub authorization: Vec<Option<String>>,
}

#[derive(Clone)]
struct RelayerState {
    behavior: RelayerBehavior,
    log: Arc<Mutex<RelayerLog>>,
}

/// In-process relayer listening on an ephemeral port
pub struct MockRelayer {
    pub url: String,
    pub log: Arc<Mutex<RelayerLog>>,
}

impl MockRelayer {
    pub async fn start(behavior: RelayerBehavior) -> Self {
        let log = Arc::new(Mutex::new(RelayerLog::default()));
        let state = RelayerState {
            behavior,
            log: log.clone(),
        };

        let app = Router::new()
            .route("/txs", post(submit))
            .route("/txs/:id", get(lookup))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock relayer");
        let addr = listener.local_addr().expect("No local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}", addr),
            log,
        }
    }

    /// Relayer settings pointing at this server with fast timings
    pub fn config(&self) -> RelayerConfig {
        RelayerConfig {
            url: Some(self.url.clone()),
            api_key: Some("test-key".to_string()),
            contract_address: Some(CONTRACT.to_string()),
            confirmation_timeout_secs: 2,
            poll_interval_ms: 20,
            max_attempts: 3,
            initial_backoff_ms: 10,
            ..Default::default()
        }
    }

    pub fn submit_calls(&self) -> u32 {
        self.log.lock().unwrap().submit_calls
    }
}

async fn submit(
    State(state): State<RelayerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut log = state.log.lock().unwrap();
    log.submit_calls += 1;
    log.bodies.push(body);
    log.authorization.push(
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    if let Some(code) = state.behavior.reject_with {
        let status = StatusCode::from_u16(code).unwrap();
        return (status, Json(json!({"error": "rejected"})));
    }
    if log.submit_calls <= state.behavior.failing_submissions {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "try later"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({"transactionId": "tx-1", "status": "pending"})),
    )
}

async fn lookup(State(state): State<RelayerState>, Path(id): Path<String>) -> Json<Value> {
    let status = {
        let mut log = state.log.lock().unwrap();
        log.poll_calls += 1;
        if log.poll_calls <= state.behavior.pending_polls {
            "pending"
        } else {
            state.behavior.final_status
        }
    };

    if let Some(delay) = state.behavior.lookup_delay {
        tokio::time::sleep(delay).await;
    }
    Json(json!({"transactionId": id, "status": status, "hash": "0xfeed"}))
}
