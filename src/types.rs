//! Core data types for the Kudos pipeline
//!
//! This module defines the values that flow between the pipeline stages:
//! extracted text features, helpfulness sub-scores, payout requests and the
//! persisted payout records. None of them carry identity; each review maps
//! independently to one report, one incentive and at most one record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linguistic features extracted from a single review
///
/// Created fresh for every scoring call and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// Number of whitespace-delimited tokens
    pub word_count: usize,

    /// Tokens tagged as adjectives
    pub adjective_count: usize,

    /// Tokens tagged as adverbs
    pub adverb_count: usize,

    /// Noun phrases identified by the tagger
    pub noun_phrase_count: usize,
}

/// Independent components of the helpfulness score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    /// Share of adjectives and adverbs among all words, in [0, 100]
    pub descriptiveness: f64,

    /// 100 when an actionability keyword is present, otherwise 10
    pub actionability: f64,

    /// 100 when more than two noun phrases are present, otherwise 10
    pub specificity: f64,

    /// 100, 75 or 50 depending on the word-count bucket
    pub length_adequacy: f64,
}

/// Result of scoring one review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelpfulnessReport {
    /// Weighted aggregate in [0, 100]
    pub helpfulness: f64,

    /// Breakdown that produced the aggregate
    pub subscores: SubScores,

    /// Raw features the sub-scores were derived from
    pub features: FeatureVector,
}

impl HelpfulnessReport {
    /// Render the human-readable block handed back to callers
    pub fn render(&self) -> String {
        format!(
            "Review Helpfulness Score: {:.2}\n\
             Contributing Scores:\n\
             - Descriptiveness: {:.2}\n\
             - Actionability: {:.2}\n\
             - Specificity: {:.2}\n\
             - Length Adequacy: {:.2}",
            self.helpfulness,
            self.subscores.descriptiveness,
            self.subscores.actionability,
            self.subscores.specificity,
            self.subscores.length_adequacy,
        )
    }
}

impl fmt::Display for HelpfulnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A payout ready to be handed to a recorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    /// Fixed-point decimal amount, e.g. "0.00007625"
    pub incentive: String,

    /// Wallet address of the reviewer
    #[serde(alias = "userAddress", alias = "clientWallet")]
    pub recipient_address: String,

    /// Service the review was written for
    pub service_id: String,
}

impl PayoutRequest {
    pub fn new(
        incentive: impl Into<String>,
        recipient_address: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Self {
        Self {
            incentive: incentive.into(),
            recipient_address: recipient_address.into(),
            service_id: service_id.into(),
        }
    }
}

/// Persisted payout entry
///
/// The canonical recipient field is `recipientAddress`; files written by
/// older tooling used `userAddress` or `clientWallet` and are still readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRecord {
    pub incentive: String,

    #[serde(alias = "userAddress", alias = "clientWallet")]
    pub recipient_address: String,

    pub service_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Relayer transaction that settled this payout, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl PayoutRecord {
    /// Build a timestamped record from a request
    pub fn from_request(request: &PayoutRequest) -> Self {
        Self {
            incentive: request.incentive.clone(),
            recipient_address: request.recipient_address.clone(),
            service_id: request.service_id.clone(),
            timestamp: Some(Utc::now()),
            transaction_id: None,
        }
    }

    /// Attach the settling transaction
    pub fn with_transaction(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }
}

/// Outcome of a successful recorder call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutReceipt {
    /// The record as persisted
    pub record: PayoutRecord,

    /// Where it went: a file path or a transaction id
    pub location: String,

    /// Confirmation message for the caller
    pub message: String,
}

/// One piece of feedback entering the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    pub review_text: String,

    #[serde(alias = "userAddress", alias = "clientWallet")]
    pub recipient_address: String,

    pub service_id: String,
}
