//! JSON file payout store
//!
//! The file holds one pretty-printed JSON array of [`PayoutRecord`]s. Every
//! append rewrites the whole array to a sibling temp file and renames it over
//! the target, so readers never observe a half-written file.

use crate::error::{KudosError, Result};
use crate::payout::{validate_request, PayoutRecorder};
use crate::types::{PayoutReceipt, PayoutRecord, PayoutRequest};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Appends payouts to a JSON array file
pub struct JsonFileRecorder {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileRecorder {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records currently in the file; a missing or empty file has none
    pub async fn list(&self) -> Result<Vec<PayoutRecord>> {
        read_records(&self.path).await
    }

    /// Append one record and return it as stored
    pub async fn append(&self, record: PayoutRecord) -> Result<PayoutRecord> {
        let _guard = self.write_lock.lock().await;

        let mut records = read_records(&self.path).await?;
        records.push(record.clone());
        write_records(&self.path, &records).await?;

        debug!(
            "Appended payout to {} ({} records)",
            self.path.display(),
            records.len()
        );
        Ok(record)
    }
}

#[async_trait]
impl PayoutRecorder for JsonFileRecorder {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn record(&self, request: &PayoutRequest) -> Result<PayoutReceipt> {
        validate_request(request)?;

        let record = self.append(PayoutRecord::from_request(request)).await?;
        let location = self.path.display().to_string();

        info!(
            "Saved payout of {} to {} for service {}",
            record.incentive, record.recipient_address, record.service_id
        );

        Ok(PayoutReceipt {
            message: format!("Payout successfully saved to {}", location),
            location,
            record,
        })
    }
}

async fn read_records(path: &Path) -> Result<Vec<PayoutRecord>> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(save_failure(e)),
    };

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|e| {
        KudosError::PersistenceFailure(format!(
            "Failed to read payout file {}: {}",
            path.display(),
            e
        ))
    })
}

async fn write_records(path: &Path, records: &[PayoutRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(save_failure)?;
    }

    let json = serde_json::to_string_pretty(records).map_err(save_failure)?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, json).await.map_err(save_failure)?;
    fs::rename(&tmp_path, path).await.map_err(save_failure)?;
    Ok(())
}

fn save_failure(err: impl std::fmt::Display) -> KudosError {
    KudosError::PersistenceFailure(format!("Failed to save payout to file: {}", err))
}
