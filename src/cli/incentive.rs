//! Incentive for a score

use kudos_core::{calculate_incentive, error::Result};

pub async fn handle(score: f64) -> Result<()> {
    let incentive = calculate_incentive(score)?;
    println!("{}", incentive.to_decimal_string());
    Ok(())
}
