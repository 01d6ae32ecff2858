//! Review scoring: tagging, feature extraction and helpfulness.
//!
//! # Architecture
//!
//! - **PosTagger**: part-of-speech tags, one per whitespace-delimited word
//! - **FeatureExtractor**: word, adjective, adverb and noun-phrase counts
//! - **HelpfulnessScorer**: fixed-weight combination of four sub-scores
//!
//! All three are synchronous and hold no mutable state, so a single instance
//! can be shared across threads and score reviews concurrently.
//!
//! # Usage
//!
//! ```rust
//! use kudos_core::scoring::HelpfulnessScorer;
//!
//! let report = HelpfulnessScorer::default()
//!     .score("The battery died after a week, please fix the charging issue.")
//!     .unwrap();
//! assert_eq!(report.subscores.actionability, 100.0);
//! println!("{}", report.render());
//! ```

pub mod feature_extractor;
pub mod helpfulness;
pub mod lexicon;
pub mod tagger;

pub use feature_extractor::FeatureExtractor;
pub use helpfulness::{HelpfulnessScorer, ACTIONABILITY_KEYWORDS};
pub use lexicon::Lexicon;
pub use tagger::{LexiconTagger, PartOfSpeech, PosTagger, TaggedToken};

use crate::error::Result;
use std::path::Path;
use std::sync::Arc;

/// Build a scorer over the built-in tagger, optionally extended by a lexicon file
pub fn scorer_with_lexicon(lexicon_path: Option<&Path>) -> Result<HelpfulnessScorer> {
    let tagger = match lexicon_path {
        Some(path) => LexiconTagger::from_lexicon_file(path)?,
        None => LexiconTagger::new(),
    };
    Ok(HelpfulnessScorer::new(FeatureExtractor::new(Arc::new(
        tagger,
    ))))
}
