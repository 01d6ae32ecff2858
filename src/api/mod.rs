//! HTTP API for feedback submission
//!
//! - `POST /api/feedback`: score, price and record one review
//! - `POST /api/score`: helpfulness breakdown only
//! - `POST /api/incentive`: incentive for a score
//! - `GET /health`

pub mod server;

pub use server::{
    router, ApiServer, ApiServerConfig, ErrorBody, FeedbackResponse, HealthResponse,
    IncentiveResponse,
};
