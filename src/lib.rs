//! Kudos - review helpfulness scoring and micro-incentive payouts
//!
//! Anonymous feedback is scored for how useful it is to the company, the
//! score is mapped onto a small payout, and the payout is recorded:
//!
//! ```text
//! review text -> FeatureVector -> HelpfulnessReport -> Incentive -> PayoutRecord
//! ```
//!
//! # Architecture
//!
//! - **scoring**: part-of-speech tagging, feature extraction, helpfulness
//! - **incentive**: linear score-to-payout mapping
//! - **payout**: JSON file and transaction relayer recorders
//! - **pipeline**: the typed score -> incentive -> payout sequence
//! - **mcp**: the stages as JSON-RPC tools for an agent
//! - **api**: HTTP feedback endpoint
//!
//! # Example
//!
//! ```ignore
//! use kudos_core::{FeedbackPipeline, FeedbackSubmission, HelpfulnessScorer, JsonFileRecorder};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> kudos_core::Result<()> {
//!     let pipeline = FeedbackPipeline::new(
//!         HelpfulnessScorer::default(),
//!         Arc::new(JsonFileRecorder::new("payouts.json")),
//!     );
//!
//!     let outcome = pipeline
//!         .process(&FeedbackSubmission {
//!             review_text: "Checkout crashed twice, please fix the payment form.".to_string(),
//!             recipient_address: "0x1234".to_string(),
//!             service_id: "17".to_string(),
//!         })
//!         .await?;
//!
//!     println!("{}", outcome.transcript);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod incentive;
pub mod mcp;
pub mod payout;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use crate::config::{KudosConfig, PayoutBackend};
pub use error::{KudosError, Result};
pub use incentive::{calculate_incentive, Incentive};
pub use mcp::{McpServer, ToolHandler};
pub use payout::{
    recorder_from_config, ChainThenFileRecorder, JsonFileRecorder, PayoutRecorder,
    RelayerRecorder,
};
pub use pipeline::{FeedbackPipeline, PipelineOutcome};
pub use scoring::{FeatureExtractor, HelpfulnessScorer, LexiconTagger, PosTagger};
pub use types::{
    FeatureVector, FeedbackSubmission, HelpfulnessReport, PayoutReceipt, PayoutRecord,
    PayoutRequest, SubScores,
};

/// Assemble the pipeline described by a configuration
pub fn pipeline_from_config(config: &KudosConfig) -> Result<FeedbackPipeline> {
    let scorer = scoring::scorer_with_lexicon(config.scoring.lexicon_path.as_deref())?;
    let recorder = recorder_from_config(&config.payout)?;
    Ok(FeedbackPipeline::new(scorer, recorder))
}
