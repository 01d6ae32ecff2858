//! Run one review through the full pipeline

use super::helpers::{print_json, read_review_text};
use kudos_core::{error::Result, pipeline_from_config, FeedbackSubmission, KudosConfig};
use serde_json::json;

pub async fn handle(
    config: &KudosConfig,
    recipient: String,
    service: String,
    text: Option<String>,
    json: bool,
) -> Result<()> {
    let submission = FeedbackSubmission {
        review_text: read_review_text(text)?,
        recipient_address: recipient,
        service_id: service,
    };

    let pipeline = pipeline_from_config(config)?;
    let outcome = pipeline.process(&submission).await?;

    if json {
        print_json(&json!({
            "helpfulness": outcome.report.helpfulness,
            "subscores": outcome.report.subscores,
            "incentive": outcome.incentive,
            "payout": outcome.receipt.record,
            "location": outcome.receipt.location,
        }))?;
    } else {
        println!("{}", outcome.transcript);
    }

    Ok(())
}
