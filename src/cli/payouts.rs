//! List recorded payouts

use super::helpers::print_json;
use kudos_core::{error::Result, JsonFileRecorder, KudosConfig};
use std::path::PathBuf;

pub async fn handle(config: &KudosConfig, file: Option<PathBuf>, json: bool) -> Result<()> {
    let path = file.unwrap_or_else(|| config.payout.file_path.clone());
    let records = JsonFileRecorder::new(&path).list().await?;

    if json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No payouts recorded in {}", path.display());
        return Ok(());
    }

    println!("{} payout(s) in {}", records.len(), path.display());
    println!();
    for record in &records {
        let when = record
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<19}  {:>12}  {}  service {}{}",
            when,
            record.incentive,
            record.recipient_address,
            record.service_id,
            record
                .transaction_id
                .as_deref()
                .map(|tx| format!("  tx {}", tx))
                .unwrap_or_default()
        );
    }

    let total: f64 = records
        .iter()
        .filter_map(|r| r.incentive.parse::<f64>().ok())
        .sum();
    println!();
    println!("Total: {}", total);

    Ok(())
}
