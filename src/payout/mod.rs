//! Payout recording
//!
//! A [`PayoutRecorder`] takes a computed incentive and makes it durable,
//! either by appending it to a JSON file, by settling it through a
//! transaction relayer, or both in sequence.

pub mod file;
pub mod relayer;

pub use file::JsonFileRecorder;
pub use relayer::RelayerRecorder;

use crate::config::{PayoutBackend, PayoutConfig};
use crate::error::{KudosError, Result};
use crate::incentive::parse_decimal_amount;
use crate::types::{PayoutReceipt, PayoutRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Makes a payout durable
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayoutRecorder: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Record one payout, blocking until it is durable
    async fn record(&self, request: &PayoutRequest) -> Result<PayoutReceipt>;
}

/// Check a request before any backend sees it
pub fn validate_request(request: &PayoutRequest) -> Result<()> {
    parse_decimal_amount(&request.incentive)?;

    if request.recipient_address.trim().is_empty() {
        return Err(KudosError::ValidationError(
            "recipientAddress must not be empty".to_string(),
        ));
    }
    if request.service_id.trim().is_empty() {
        return Err(KudosError::ValidationError(
            "serviceId must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Settles through the relayer, then appends the record with its transaction id
pub struct ChainThenFileRecorder {
    relayer: RelayerRecorder,
    file: JsonFileRecorder,
}

impl ChainThenFileRecorder {
    pub fn new(relayer: RelayerRecorder, file: JsonFileRecorder) -> Self {
        Self { relayer, file }
    }
}

#[async_trait]
impl PayoutRecorder for ChainThenFileRecorder {
    fn name(&self) -> &'static str {
        "relayer_then_file"
    }

    async fn record(&self, request: &PayoutRequest) -> Result<PayoutReceipt> {
        let settled = self.relayer.record(request).await?;
        let transaction_id = settled.location.clone();

        // No rollback: a file failure after settlement still reports the tx
        let stored = self
            .file
            .append(settled.record.clone())
            .await
            .map_err(|e| {
                KudosError::PersistenceFailure(format!(
                    "transaction {} settled but not saved: {}",
                    transaction_id, e
                ))
            })?;

        info!(
            "Payout {} settled as {} and saved to {}",
            request.incentive,
            transaction_id,
            self.file.path().display()
        );

        Ok(PayoutReceipt {
            message: format!(
                "Transaction {} confirmed and payout saved to {}",
                transaction_id,
                self.file.path().display()
            ),
            location: transaction_id,
            record: stored,
        })
    }
}

/// Build the recorder the configuration asks for
pub fn recorder_from_config(config: &PayoutConfig) -> Result<Arc<dyn PayoutRecorder>> {
    let recorder: Arc<dyn PayoutRecorder> = match config.backend {
        PayoutBackend::File => Arc::new(JsonFileRecorder::new(&config.file_path)),
        PayoutBackend::Relayer => Arc::new(RelayerRecorder::from_config(&config.relayer)?),
        PayoutBackend::RelayerThenFile => Arc::new(ChainThenFileRecorder::new(
            RelayerRecorder::from_config(&config.relayer)?,
            JsonFileRecorder::new(&config.file_path),
        )),
    };

    info!("Payout backend: {}", recorder.name());
    Ok(recorder)
}
