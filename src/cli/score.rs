//! Score a review

use super::helpers::{print_json, read_review_text};
use kudos_core::{error::Result, KudosConfig};
use tracing::debug;

pub async fn handle(config: &KudosConfig, text: Option<String>, json: bool) -> Result<()> {
    let text = read_review_text(text)?;
    let scorer = kudos_core::scoring::scorer_with_lexicon(config.scoring.lexicon_path.as_deref())?;

    debug!("Scoring {} bytes of review text", text.len());
    let report = scorer.score(&text)?;

    if json {
        print_json(&report)?;
    } else {
        println!("{}", report.render());
        println!();
        println!(
            "Words: {}  Adjectives: {}  Adverbs: {}  Noun phrases: {}",
            report.features.word_count,
            report.features.adjective_count,
            report.features.adverb_count,
            report.features.noun_phrase_count
        );
    }

    Ok(())
}
