//! Review helpfulness scoring
//!
//! Four independent sub-scores combined with fixed weights:
//!
//! | sub-score        | rule                                                     | weight |
//! |------------------|----------------------------------------------------------|--------|
//! | descriptiveness  | (adjectives + adverbs) / words * 100                      | 0.10   |
//! | actionability    | 100 if any keyword occurs in the lowercased text, else 10 | 0.30   |
//! | specificity      | 100 if more than two noun phrases, else 10                | 0.30   |
//! | length adequacy  | 100 for 50..=200 words, 75 for 20..50 or 201..=500, else 50 | 0.30 |
//!
//! The keyword table and length buckets are literal heuristics and are kept
//! exactly as they are; stored scores stay comparable across releases only as
//! long as these tables do not move.

use crate::error::Result;
use crate::scoring::feature_extractor::FeatureExtractor;
use crate::types::{FeatureVector, HelpfulnessReport, SubScores};
use tracing::debug;

/// Terms that mark a review as actionable for the company
///
/// Matched as plain substrings of the lowercased review, so "fix" also hits
/// "fixed" and "fixes".
pub const ACTIONABILITY_KEYWORDS: &[&str] = &[
    "fix", "improve", "enhance", "upgrade", "address", "modify", "correct",
    "adjust", "update", "problem", "issue", "bug", "crash", "error", "defect", "lacks",
    "malfunction", "broken", "glitch", "recommend", "suggest", "consider",
    "would prefer", "should add", "needs", "could be better", "option for",
    "feature", "functionality", "option", "performance", "speed", "usability",
    "compatibility", "design", "quality", "durability", "customer service",
    "delivery", "support", "response", "shipping", "instructions",
    "communication", "setup", "disappointed", "frustrated", "annoyed",
    "confused", "unclear", "hard to use", "not satisfied",
];

pub const DESCRIPTIVENESS_WEIGHT: f64 = 0.10;
pub const ACTIONABILITY_WEIGHT: f64 = 0.30;
pub const SPECIFICITY_WEIGHT: f64 = 0.30;
pub const LENGTH_WEIGHT: f64 = 0.30;

const HIT: f64 = 100.0;
const MISS: f64 = 10.0;

/// Scores reviews for helpfulness
#[derive(Clone, Default)]
pub struct HelpfulnessScorer {
    extractor: FeatureExtractor,
}

impl HelpfulnessScorer {
    /// Create a scorer over the given feature extractor
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self { extractor }
    }

    /// Score a review
    ///
    /// Fails only when the tagger behind the extractor is unavailable.
    pub fn score(&self, text: &str) -> Result<HelpfulnessReport> {
        let features = self.extractor.extract(text)?;

        let subscores = SubScores {
            descriptiveness: descriptiveness(&features),
            actionability: actionability(text),
            specificity: specificity(&features),
            length_adequacy: length_adequacy(features.word_count),
        };
        let helpfulness = combine(&subscores);

        debug!(
            "Scored review: helpfulness={:.2} (desc={:.2}, act={}, spec={}, len={})",
            helpfulness,
            subscores.descriptiveness,
            subscores.actionability,
            subscores.specificity,
            subscores.length_adequacy
        );

        Ok(HelpfulnessReport {
            helpfulness,
            subscores,
            features,
        })
    }
}

/// Share of adjectives and adverbs among all words, as a percentage
pub fn descriptiveness(features: &FeatureVector) -> f64 {
    if features.word_count == 0 {
        return 0.0;
    }
    (features.adjective_count + features.adverb_count) as f64 / features.word_count as f64 * 100.0
}

/// 100 if the review mentions any actionability keyword, else 10
pub fn actionability(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    if ACTIONABILITY_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        HIT
    } else {
        MISS
    }
}

/// 100 if the review names more than two things, else 10
pub fn specificity(features: &FeatureVector) -> f64 {
    if features.noun_phrase_count > 2 {
        HIT
    } else {
        MISS
    }
}

/// Length bucket score over the whitespace word count
pub fn length_adequacy(word_count: usize) -> f64 {
    match word_count {
        50..=200 => 100.0,
        20..=49 | 201..=500 => 75.0,
        _ => 50.0,
    }
}

fn combine(subscores: &SubScores) -> f64 {
    DESCRIPTIVENESS_WEIGHT * subscores.descriptiveness
        + ACTIONABILITY_WEIGHT * subscores.actionability
        + SPECIFICITY_WEIGHT * subscores.specificity
        + LENGTH_WEIGHT * subscores.length_adequacy
}
