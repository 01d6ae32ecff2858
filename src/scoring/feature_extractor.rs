//! Linguistic feature extraction for review text.
//!
//! Derives the counts the helpfulness scorer needs from a single review. The
//! text itself is never stored; only the counts leave this module.

use crate::error::Result;
use crate::scoring::tagger::{LexiconTagger, PartOfSpeech, PosTagger, TaggedToken};
use crate::types::FeatureVector;
use std::sync::Arc;
use tracing::debug;

/// Feature extractor
#[derive(Clone)]
pub struct FeatureExtractor {
    tagger: Arc<dyn PosTagger>,
}

impl FeatureExtractor {
    /// Create a feature extractor over the given tagger
    pub fn new(tagger: Arc<dyn PosTagger>) -> Self {
        Self { tagger }
    }

    /// Extract features from a review
    ///
    /// Empty input yields all zeros without consulting the tagger.
    pub fn extract(&self, text: &str) -> Result<FeatureVector> {
        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            return Ok(FeatureVector::default());
        }

        let tokens = self.tagger.tag(text)?;

        let adjective_count = count_tag(&tokens, PartOfSpeech::Adjective);
        let adverb_count = count_tag(&tokens, PartOfSpeech::Adverb);
        let noun_phrase_count = count_noun_phrases(&tokens);

        debug!(
            "Extracted features with {} tagger: {} words, {} adj, {} adv, {} noun phrases",
            self.tagger.name(),
            word_count,
            adjective_count,
            adverb_count,
            noun_phrase_count
        );

        Ok(FeatureVector {
            word_count,
            adjective_count,
            adverb_count,
            noun_phrase_count,
        })
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(Arc::new(LexiconTagger::new()))
    }
}

fn count_tag(tokens: &[TaggedToken], tag: PartOfSpeech) -> usize {
    tokens.iter().filter(|t| t.tag == tag).count()
}

/// Count maximal runs of nominal tokens, split at clause punctuation
///
/// "the design quality" is one phrase; "design, quality" is two.
fn count_noun_phrases(tokens: &[TaggedToken]) -> usize {
    let mut count = 0;
    let mut in_phrase = false;

    for token in tokens {
        if token.tag.is_nominal() {
            if !in_phrase {
                count += 1;
                in_phrase = true;
            }
        } else {
            in_phrase = false;
        }

        if token.ends_clause {
            in_phrase = false;
        }
    }

    count
}
