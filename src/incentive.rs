//! Incentive calculation
//!
//! Maps a helpfulness score in [1, 100] linearly onto a payout in
//! [0.000001, 0.0001]. Amounts leave this module as fixed-point decimal
//! strings because the on-chain amount parsers downstream reject scientific
//! notation.

use crate::error::{KudosError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 100.0;
pub const MIN_INCENTIVE: f64 = 1e-6;
pub const MAX_INCENTIVE: f64 = 1e-4;

/// A payout amount within [`MIN_INCENTIVE`, `MAX_INCENTIVE`]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Incentive(f64);

impl Incentive {
    /// The amount as a float
    pub fn amount(self) -> f64 {
        self.0
    }

    /// Shortest fixed-point decimal text that reads back as the same amount
    pub fn to_decimal_string(self) -> String {
        // f64's Display never switches to exponent notation
        format!("{}", self.0)
    }
}

impl fmt::Display for Incentive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Incentive {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

/// Calculate the incentive for a helpfulness score
///
/// `score` must lie in [1, 100]; anything else (NaN included) is rejected
/// without computing anything.
pub fn calculate_incentive(score: f64) -> Result<Incentive> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(KudosError::InvalidScore(score));
    }

    let amount = MIN_INCENTIVE
        + (score - MIN_SCORE) / (MAX_SCORE - MIN_SCORE) * (MAX_INCENTIVE - MIN_INCENTIVE);

    Ok(Incentive(amount))
}

/// Clamp an arbitrary score into the range [`calculate_incentive`] accepts
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Validate an incentive amount supplied as text
///
/// Accepts plain fixed-point decimals only ("0.00005", not "5e-5") within the
/// incentive range. Returns the parsed amount.
pub fn parse_decimal_amount(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let mut parts = trimmed.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();

    let digits_only = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let well_formed = digits_only(whole) && fraction.map_or(true, digits_only);
    if !well_formed {
        return Err(KudosError::ValidationError(format!(
            "incentive must be a fixed-point decimal, got '{}'",
            text
        )));
    }

    let amount: f64 = trimmed
        .parse()
        .map_err(|e| KudosError::ValidationError(format!("incentive '{}': {}", text, e)))?;

    if !(MIN_INCENTIVE..=MAX_INCENTIVE).contains(&amount) {
        return Err(KudosError::ValidationError(format!(
            "incentive {} outside [{}, {}]",
            text, MIN_INCENTIVE, MAX_INCENTIVE
        )));
    }

    Ok(amount)
}
