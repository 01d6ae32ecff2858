//! Typed feedback pipeline
//!
//! Runs one submission through score -> incentive -> payout in that order.
//! Each stage's output feeds the next; a failure stops the pipeline and is
//! returned unchanged. Nothing is retried here.

use crate::error::{KudosError, Result};
use crate::incentive::{calculate_incentive, clamp_score, Incentive};
use crate::payout::PayoutRecorder;
use crate::scoring::HelpfulnessScorer;
use crate::types::{FeedbackSubmission, HelpfulnessReport, PayoutReceipt, PayoutRequest};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub report: HelpfulnessReport,
    pub incentive: Incentive,
    pub receipt: PayoutReceipt,
    /// Human-readable account of each stage, in order
    pub transcript: String,
}

/// Score, price and record reviews
#[derive(Clone)]
pub struct FeedbackPipeline {
    scorer: HelpfulnessScorer,
    recorder: Arc<dyn PayoutRecorder>,
}

impl FeedbackPipeline {
    pub fn new(scorer: HelpfulnessScorer, recorder: Arc<dyn PayoutRecorder>) -> Self {
        Self { scorer, recorder }
    }

    pub fn scorer(&self) -> &HelpfulnessScorer {
        &self.scorer
    }

    pub fn recorder(&self) -> &Arc<dyn PayoutRecorder> {
        &self.recorder
    }

    /// Process one submission end to end
    pub async fn process(&self, submission: &FeedbackSubmission) -> Result<PipelineOutcome> {
        validate_submission(submission)?;

        let submission_id = Uuid::new_v4();
        debug!(
            "Scoring submission {} for service {} ({} bytes)",
            submission_id,
            submission.service_id,
            submission.review_text.len()
        );
        let report = self.scorer.score(&submission.review_text)?;

        let score = clamp_score(report.helpfulness);
        let incentive = calculate_incentive(score)?;
        debug!(
            "Helpfulness {:.2} earns incentive {}",
            report.helpfulness, incentive
        );

        let request = PayoutRequest::new(
            incentive.to_decimal_string(),
            submission.recipient_address.trim(),
            submission.service_id.trim(),
        );
        let receipt = self.recorder.record(&request).await?;

        info!(
            "Processed submission {}: helpfulness {:.2}, incentive {}, recorded at {}",
            submission_id, report.helpfulness, incentive, receipt.location
        );

        let transcript = format!(
            "{}\n\nIncentive: {}\n\n{}",
            report.render(),
            incentive.to_decimal_string(),
            receipt.message
        );

        Ok(PipelineOutcome {
            report,
            incentive,
            receipt,
            transcript,
        })
    }
}

fn validate_submission(submission: &FeedbackSubmission) -> Result<()> {
    if submission.recipient_address.trim().is_empty() {
        return Err(KudosError::ValidationError(
            "recipientAddress must not be empty".to_string(),
        ));
    }
    if submission.service_id.trim().is_empty() {
        return Err(KudosError::ValidationError(
            "serviceId must not be empty".to_string(),
        ));
    }
    Ok(())
}
