//! Transaction relayer payout backend
//!
//! Each payout becomes one contract call (`attestInteraction(recipient,
//! serviceId)` by default) carrying the incentive as its value. The relayer
//! signs and broadcasts; we submit, then poll the transaction until it is
//! mined or the confirmation deadline passes.
//!
//! Wire format:
//! - `POST {url}/txs` with `{to, method, args, value, speed}` returns
//!   `{transactionId, status}`
//! - `GET {url}/txs/{transactionId}` returns `{transactionId, status, hash?}`

use crate::config::RelayerConfig;
use crate::error::{KudosError, Result};
use crate::payout::{validate_request, PayoutRecorder};
use crate::types::{PayoutReceipt, PayoutRecord, PayoutRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{sleep, timeout_at, Instant};
use tracing::{debug, info, warn};

/// Per-request HTTP timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transaction submission body
#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    to: &'a str,
    method: &'a str,
    args: [&'a str; 2],
    value: &'a str,
    speed: &'a str,
}

/// Relayer view of a transaction
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerTransaction {
    pub transaction_id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Sent,
    Submitted,
    Inmempool,
    Mined,
    Confirmed,
    Failed,
    Expired,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, TransactionStatus::Mined | TransactionStatus::Confirmed)
    }

    pub fn is_terminal_failure(self) -> bool {
        matches!(
            self,
            TransactionStatus::Failed | TransactionStatus::Expired | TransactionStatus::Cancelled
        )
    }
}

/// Outcome of one submission attempt
enum Attempt {
    /// Worth retrying: connection trouble, 5xx, 429
    Transient(String),
    Fatal(KudosError),
}

/// Settles payouts through an HTTP transaction relayer
pub struct RelayerRecorder {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    contract_address: String,
    method: String,
    confirmation_timeout: Duration,
    poll_interval: Duration,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl RelayerRecorder {
    pub fn from_config(config: &RelayerConfig) -> Result<Self> {
        let base_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                KudosError::Config(config::ConfigError::Message(
                    "payout.relayer.url is not set".to_string(),
                ))
            })?
            .trim_end_matches('/')
            .to_string();

        let contract_address = config
            .contract_address
            .clone()
            .filter(|a| !a.trim().is_empty())
            .ok_or_else(|| {
                KudosError::Config(config::ConfigError::Message(
                    "payout.relayer.contract_address is not set".to_string(),
                ))
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            contract_address,
            method: config.method.clone(),
            confirmation_timeout: config.confirmation_timeout(),
            poll_interval: config.poll_interval(),
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff(),
        })
    }

    /// Submit with bounded exponential backoff on transient failures
    async fn submit_with_retry(&self, request: &PayoutRequest) -> Result<RelayerTransaction> {
        let mut attempt = 1;

        loop {
            match self.submit(request).await {
                Ok(tx) => return Ok(tx),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Transient(reason)) => {
                    if attempt >= self.max_attempts {
                        return Err(KudosError::PersistenceFailure(format!(
                            "relayer submission failed after {} attempts: {}",
                            attempt, reason
                        )));
                    }

                    let backoff = self.backoff_for(attempt);
                    warn!(
                        "Relayer submission failed ({}), retrying after {}ms (attempt {}/{})",
                        reason,
                        backoff.as_millis(),
                        attempt + 1,
                        self.max_attempts
                    );

                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Delay before retrying after the given failed attempt, doubling each time
    fn backoff_for(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Submit once (no retry)
    async fn submit(&self, request: &PayoutRequest) -> std::result::Result<RelayerTransaction, Attempt> {
        let body = SubmitRequest {
            to: &self.contract_address,
            method: &self.method,
            args: [request.recipient_address.as_str(), request.service_id.as_str()],
            value: &request.incentive,
            speed: "fast",
        };

        debug!(
            "Submitting {}({}, {}) with value {}",
            self.method, request.recipient_address, request.service_id, request.incentive
        );

        let response = self
            .authorized(self.client.post(format!("{}/txs", self.base_url)))
            .json(&body)
            .send()
            .await
            .map_err(|e| Attempt::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<RelayerTransaction>().await.map_err(|e| {
                Attempt::Fatal(KudosError::PersistenceFailure(format!(
                    "unreadable relayer response: {}",
                    e
                )))
            });
        }

        let detail = response.text().await.unwrap_or_default();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Err(Attempt::Transient(format!("status {}: {}", status, detail)))
        } else {
            Err(Attempt::Fatal(KudosError::PersistenceFailure(format!(
                "relayer rejected transaction with status {}: {}",
                status, detail
            ))))
        }
    }

    /// Poll until the transaction settles, fails, or the deadline passes
    async fn wait_for_confirmation(&self, transaction_id: &str) -> Result<RelayerTransaction> {
        let started = Instant::now();
        let deadline = started + self.confirmation_timeout;

        let timed_out = |now: Instant| KudosError::ConfirmationTimeout {
            transaction_id: transaction_id.to_string(),
            waited_secs: (now - started).as_secs(),
        };

        loop {
            // A stalled lookup must not outlive the deadline
            let polled = match timeout_at(deadline, self.fetch(transaction_id)).await {
                Ok(polled) => polled,
                Err(_) => return Err(timed_out(Instant::now())),
            };

            match polled {
                Ok(tx) if tx.status.is_settled() => return Ok(tx),
                Ok(tx) if tx.status.is_terminal_failure() => {
                    return Err(KudosError::PersistenceFailure(format!(
                        "transaction {} ended with status {:?}",
                        transaction_id, tx.status
                    )));
                }
                Ok(tx) => debug!("Transaction {} is {:?}", transaction_id, tx.status),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Transient(reason)) => {
                    warn!("Polling transaction {} failed: {}", transaction_id, reason)
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(timed_out(now));
            }
            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    async fn fetch(&self, transaction_id: &str) -> std::result::Result<RelayerTransaction, Attempt> {
        let response = self
            .authorized(
                self.client
                    .get(format!("{}/txs/{}", self.base_url, transaction_id)),
            )
            .send()
            .await
            .map_err(|e| Attempt::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<RelayerTransaction>()
                .await
                .map_err(|e| Attempt::Transient(e.to_string()));
        }

        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Err(Attempt::Transient(format!("status {}", status)))
        } else {
            Err(Attempt::Fatal(KudosError::PersistenceFailure(format!(
                "relayer lookup of {} failed with status {}",
                transaction_id, status
            ))))
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[async_trait]
impl PayoutRecorder for RelayerRecorder {
    fn name(&self) -> &'static str {
        "relayer"
    }

    async fn record(&self, request: &PayoutRequest) -> Result<PayoutReceipt> {
        validate_request(request)?;

        let submitted = self.submit_with_retry(request).await?;
        let confirmed = self.wait_for_confirmation(&submitted.transaction_id).await?;

        info!(
            "Payout of {} to {} confirmed in transaction {}",
            request.incentive, request.recipient_address, confirmed.transaction_id
        );

        let record = PayoutRecord::from_request(request).with_transaction(&confirmed.transaction_id);
        Ok(PayoutReceipt {
            message: format!(
                "Payout of {} to {} confirmed in transaction {}",
                request.incentive, request.recipient_address, confirmed.transaction_id
            ),
            location: confirmed.transaction_id,
            record,
        })
    }
}
