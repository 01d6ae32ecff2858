//! HTTP API server

use crate::error::KudosError;
use crate::incentive::calculate_incentive;
use crate::pipeline::FeedbackPipeline;
use crate::types::{FeedbackSubmission, HelpfulnessReport, PayoutRecord};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    pipeline: FeedbackPipeline,
}

/// Feedback HTTP server
pub struct ApiServer {
    config: ApiServerConfig,
    pipeline: FeedbackPipeline,
}

impl ApiServer {
    pub fn new(config: ApiServerConfig, pipeline: FeedbackPipeline) -> Self {
        Self { config, pipeline }
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("API server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router(self.pipeline))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

/// Build the router; exposed so tests can drive it without a socket
pub fn router(pipeline: FeedbackPipeline) -> Router {
    Router::new()
        .route("/api/feedback", post(feedback_handler))
        .route("/api/score", post(score_handler))
        .route("/api/incentive", post(incentive_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { pipeline })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Error body for every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Maps failures onto 400 (caller's input) or 500 (everything else)
enum ApiError {
    BadRequest(String),
    Internal(KudosError),
}

impl From<KudosError> for ApiError {
    fn from(err: KudosError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
            ApiError::Internal(err) => {
                // Cause goes to the log, never to the client
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: INTERNAL_ERROR_BODY.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest {
    remarks: String,
    #[serde(alias = "userAddress", alias = "clientWallet")]
    recipient_address: String,
    service_id: String,
}

/// Successful feedback submission
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Stage-by-stage transcript
    pub response: String,
    pub helpfulness: f64,
    pub incentive: String,
    pub payout: PayoutRecord,
}

async fn feedback_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(req) = payload?;

    let submission = FeedbackSubmission {
        review_text: req.remarks,
        recipient_address: req.recipient_address,
        service_id: req.service_id,
    };
    let outcome = state.pipeline.process(&submission).await?;

    Ok(Json(FeedbackResponse {
        response: outcome.transcript,
        helpfulness: outcome.report.helpfulness,
        incentive: outcome.incentive.to_decimal_string(),
        payout: outcome.receipt.record,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRequest {
    review_text: String,
}

async fn score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<HelpfulnessReport>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.pipeline.scorer().score(&req.review_text)?))
}

#[derive(Debug, Deserialize)]
struct IncentiveRequest {
    score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncentiveResponse {
    pub incentive: String,
}

async fn incentive_handler(
    payload: Result<Json<IncentiveRequest>, JsonRejection>,
) -> Result<Json<IncentiveResponse>, ApiError> {
    let Json(req) = payload?;
    let incentive = calculate_incentive(req.score)?;
    Ok(Json(IncentiveResponse {
        incentive: incentive.to_decimal_string(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub payout_backend: String,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        payout_backend: state.pipeline.recorder().name().to_string(),
    })
}
