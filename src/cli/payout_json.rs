//! Render a payout record without recording it

use super::helpers::print_json;
use kudos_core::{error::Result, payout::validate_request, PayoutRecord, PayoutRequest};

pub async fn handle(incentive: String, recipient: String, service: String) -> Result<()> {
    let request = PayoutRequest::new(incentive, recipient, service);
    validate_request(&request)?;

    print_json(&PayoutRecord::from_request(&request))
}
