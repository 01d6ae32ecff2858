//! Tool implementations
//!
//! Each pipeline stage is callable on its own so an agent can drive the
//! sequence itself:
//! - `check_review_helpfulness`: review text to a scored breakdown
//! - `calculate_incentive`: score to a decimal amount
//! - `save_payout_data`: amount, recipient and service to a recorded payout
//! - `generate_payout_json`: same inputs, record rendered but not stored
//! - `process_review`: all three stages in one call

use crate::error::{KudosError, Result};
use crate::incentive::calculate_incentive;
use crate::payout::validate_request;
use crate::pipeline::FeedbackPipeline;
use crate::types::{FeedbackSubmission, PayoutRecord, PayoutRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Tool schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Dispatches tool calls onto the pipeline stages
pub struct ToolHandler {
    pipeline: FeedbackPipeline,
}

impl ToolHandler {
    pub fn new(pipeline: FeedbackPipeline) -> Self {
        Self { pipeline }
    }

    /// All available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        let payout_schema = serde_json::json!({
            "type": "object",
            "properties": {
                "incentive": {
                    "type": "string",
                    "description": "The incentive amount as a decimal string, between 0.000001 and 0.0001"
                },
                "recipientAddress": {
                    "type": "string",
                    "description": "Wallet address of the reviewer"
                },
                "serviceId": {
                    "type": "string",
                    "description": "Identifier of the reviewed service"
                }
            },
            "required": ["incentive", "recipientAddress", "serviceId"]
        });

        vec![
            Tool {
                name: "check_review_helpfulness".to_string(),
                description: "Score how helpful a review is to the company, from 0 to 100, with descriptiveness, actionability, specificity and length breakdown.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "reviewText": {
                            "type": "string",
                            "description": "The review text to analyze"
                        }
                    },
                    "required": ["reviewText"]
                }),
            },
            Tool {
                name: "calculate_incentive".to_string(),
                description: "Calculate the payout for a helpfulness score between 1 and 100. Returns a decimal string between 0.000001 and 0.0001.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "score": {
                            "type": "number",
                            "minimum": 1,
                            "maximum": 100,
                            "description": "Helpfulness score"
                        }
                    },
                    "required": ["score"]
                }),
            },
            Tool {
                name: "save_payout_data".to_string(),
                description: "Record a payout for the reviewer. Call after calculate_incentive.".to_string(),
                input_schema: payout_schema.clone(),
            },
            Tool {
                name: "generate_payout_json".to_string(),
                description: "Render a timestamped payout record as JSON without recording it.".to_string(),
                input_schema: payout_schema,
            },
            Tool {
                name: "process_review".to_string(),
                description: "Score a review, calculate its incentive and record the payout in one step.".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "reviewText": {
                            "type": "string",
                            "description": "The review text"
                        },
                        "recipientAddress": {
                            "type": "string",
                            "description": "Wallet address of the reviewer"
                        },
                        "serviceId": {
                            "type": "string",
                            "description": "Identifier of the reviewed service"
                        }
                    },
                    "required": ["reviewText", "recipientAddress", "serviceId"]
                }),
            },
        ]
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_name: &str, params: Value) -> Result<Value> {
        debug!("Executing tool: {}", tool_name);

        match tool_name {
            "check_review_helpfulness" => self.check_review_helpfulness(params),
            "calculate_incentive" => self.calculate_incentive(params),
            "save_payout_data" => self.save_payout_data(params).await,
            "generate_payout_json" => self.generate_payout_json(params),
            "process_review" => self.process_review(params).await,
            _ => {
                warn!("Unknown tool: {}", tool_name);
                Err(KudosError::McpProtocol(format!("Unknown tool: {}", tool_name)))
            }
        }
    }

    fn check_review_helpfulness(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct ScoreParams {
            review_text: String,
        }

        let params: ScoreParams = parse_params(params)?;
        let report = self.pipeline.scorer().score(&params.review_text)?;
        Ok(Value::String(report.render()))
    }

    fn calculate_incentive(&self, params: Value) -> Result<Value> {
        #[derive(Deserialize)]
        struct IncentiveParams {
            score: f64,
        }

        let params: IncentiveParams = parse_params(params)?;
        let incentive = calculate_incentive(params.score)?;
        Ok(Value::String(incentive.to_decimal_string()))
    }

    async fn save_payout_data(&self, params: Value) -> Result<Value> {
        let request: PayoutRequest = parse_params(params)?;
        let receipt = self.pipeline.recorder().record(&request).await?;
        Ok(Value::String(receipt.message))
    }

    fn generate_payout_json(&self, params: Value) -> Result<Value> {
        let request: PayoutRequest = parse_params(params)?;
        validate_request(&request)?;

        let record = PayoutRecord::from_request(&request);
        Ok(Value::String(serde_json::to_string_pretty(&record)?))
    }

    async fn process_review(&self, params: Value) -> Result<Value> {
        let submission: FeedbackSubmission = parse_params(params)?;
        let outcome = self.pipeline.process(&submission).await?;
        Ok(Value::String(outcome.transcript))
    }
}

/// Deserialize tool arguments, reporting bad shapes as the caller's fault
fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| KudosError::ValidationError(format!("invalid arguments: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::MockPayoutRecorder;
    use crate::scoring::HelpfulnessScorer;
    use crate::types::PayoutReceipt;
    use serde_json::json;
    use std::sync::Arc;

    fn handler_with(recorder: MockPayoutRecorder) -> ToolHandler {
        ToolHandler::new(FeedbackPipeline::new(
            HelpfulnessScorer::default(),
            Arc::new(recorder),
        ))
    }

    #[test]
    fn test_list_tools_names() {
        let handler = handler_with(MockPayoutRecorder::new());
        let names: Vec<String> = handler.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "check_review_helpfulness",
                "calculate_incentive",
                "save_payout_data",
                "generate_payout_json",
                "process_review"
            ]
        );
    }

    #[tokio::test]
    async fn test_calculate_incentive_out_of_range() {
        let handler = handler_with(MockPayoutRecorder::new());
        let err = handler
            .execute("calculate_incentive", json!({"score": 0}))
            .await
            .unwrap_err();
        assert!(matches!(err, KudosError::InvalidScore(_)));
    }

    #[tokio::test]
    async fn test_save_payout_accepts_legacy_user_address() {
        let mut recorder = MockPayoutRecorder::new();
        recorder
            .expect_record()
            .withf(|req| req.recipient_address == "0xuser")
            .times(1)
            .returning(|req| {
                Ok(PayoutReceipt {
                    record: PayoutRecord::from_request(req),
                    location: "payouts.json".to_string(),
                    message: "Payout successfully saved to payouts.json".to_string(),
                })
            });

        let handler = handler_with(recorder);
        let result = handler
            .execute(
                "save_payout_data",
                json!({"incentive": "0.00005", "userAddress": "0xuser", "serviceId": "9"}),
            )
            .await
            .unwrap();

        assert_eq!(result, json!("Payout successfully saved to payouts.json"));
    }

    #[tokio::test]
    async fn test_generate_payout_json_has_timestamp() {
        let handler = handler_with(MockPayoutRecorder::new());
        let result = handler
            .execute(
                "generate_payout_json",
                json!({"incentive": "0.0001", "recipientAddress": "0xabc", "serviceId": "3"}),
            )
            .await
            .unwrap();

        let text = result.as_str().unwrap();
        let record: Value = serde_json::from_str(text).unwrap();
        assert_eq!(record["incentive"], "0.0001");
        assert_eq!(record["recipientAddress"], "0xabc");
        assert!(record["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_missing_argument_is_validation_error() {
        let handler = handler_with(MockPayoutRecorder::new());
        let err = handler
            .execute("check_review_helpfulness", json!({}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let handler = handler_with(MockPayoutRecorder::new());
        let err = handler.execute("delete_everything", json!({})).await.unwrap_err();
        assert!(matches!(err, KudosError::McpProtocol(_)));
    }
}
