//! Part-of-speech tagging
//!
//! The [`PosTagger`] trait is the seam between feature extraction and
//! whatever produces the tags. [`LexiconTagger`] is the built-in
//! implementation: a lexicon lookup, inflection stripping, suffix rules and a
//! one-word look-behind to settle noun/verb ambiguity ("the design" vs
//! "they design").
//!
//! Tokens are the whitespace-delimited words of the input, one tag each, so
//! the token count always equals the review's word count.

use crate::error::Result;
use crate::scoring::lexicon::{Lexicon, LexiconEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const CLAUSE_END: &[char] = &[',', '.', ';', ':', '!', '?'];
const SENTENCE_END: &[char] = &['.', '!', '?'];

/// Coarse part-of-speech classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Pronoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Preposition,
    Conjunction,
    Number,
    Interjection,
    Punctuation,
}

impl PartOfSpeech {
    /// Whether this tag can head a noun phrase
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

/// One whitespace-delimited token with its tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Lowercased word with surrounding punctuation removed
    pub word: String,

    pub tag: PartOfSpeech,

    /// The raw token ended with clause punctuation (`,` `.` `;` `:` `!` `?`)
    pub ends_clause: bool,
}

/// Part-of-speech tagger backend
///
/// Implementations must return exactly one token per whitespace-delimited
/// word. Backend failures are reported as `TaggingUnavailable`.
pub trait PosTagger: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Tag every whitespace-delimited word of `text`
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>>;
}

/// Rule-based tagger over the built-in lexicon
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    /// Extra words consulted before the built-in tables
    extension: Option<Lexicon>,
}

impl LexiconTagger {
    /// Tagger over the built-in lexicon only
    pub fn new() -> Self {
        Self { extension: None }
    }

    /// Tagger with an extension lexicon layered over the built-in one
    pub fn with_extension(extension: Lexicon) -> Self {
        Self {
            extension: Some(extension),
        }
    }

    /// Tagger with an extension lexicon loaded from a TOML file
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let extension = Lexicon::from_file(path)?;
        debug!(
            "Loaded {} extension lexicon entries from {}",
            extension.len(),
            path.display()
        );
        Ok(Self::with_extension(extension))
    }

    fn lookup(&self, word: &str) -> Option<LexiconEntry> {
        self.extension
            .as_ref()
            .and_then(|ext| ext.lookup(word))
            .or_else(|| Lexicon::builtin().lookup(word))
    }

    fn classify(&self, word: &str, context: &Context) -> PartOfSpeech {
        if is_numeric(word) {
            return PartOfSpeech::Number;
        }

        if let Some(entry) = self.lookup(word) {
            return resolve(entry, context);
        }

        if let Some(tag) = self.classify_inflected(word, context) {
            return tag;
        }

        if let Some(tag) = classify_by_suffix(word) {
            return tag;
        }

        if context.capitalized && !context.sentence_start {
            return PartOfSpeech::ProperNoun;
        }

        PartOfSpeech::Noun
    }

    /// Strip plural/third-person, past and progressive endings and retry
    fn classify_inflected(&self, word: &str, context: &Context) -> Option<PartOfSpeech> {
        let len = word.chars().count();

        if len > 5 && word.ends_with("ing") {
            return Some(match context.previous {
                Some(PartOfSpeech::Determiner)
                | Some(PartOfSpeech::Adjective)
                | Some(PartOfSpeech::Preposition) => PartOfSpeech::Noun,
                _ => PartOfSpeech::Verb,
            });
        }

        if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
            let lemmas = [
                word.strip_suffix('s').map(str::to_string),
                word.strip_suffix("es").map(str::to_string),
                word.strip_suffix("ies").map(|stem| format!("{}y", stem)),
            ];
            for lemma in lemmas.into_iter().flatten() {
                match self.lookup(&lemma) {
                    Some(LexiconEntry::Fixed(PartOfSpeech::Verb)) => return Some(PartOfSpeech::Verb),
                    Some(LexiconEntry::Fixed(PartOfSpeech::Noun))
                    | Some(LexiconEntry::Fixed(PartOfSpeech::Adjective)) => {
                        return Some(PartOfSpeech::Noun)
                    }
                    Some(LexiconEntry::NounOrVerb) => {
                        return Some(resolve(LexiconEntry::NounOrVerb, context))
                    }
                    _ => {}
                }
            }
        }

        if len > 3 && word.ends_with('d') {
            let lemmas = [
                word.strip_suffix("ed").map(str::to_string),
                word.strip_suffix('d').map(str::to_string),
                word.strip_suffix("ied").map(|stem| format!("{}y", stem)),
            ];
            for lemma in lemmas.into_iter().flatten() {
                if matches!(
                    self.lookup(&lemma),
                    Some(LexiconEntry::Fixed(PartOfSpeech::Verb)) | Some(LexiconEntry::NounOrVerb)
                ) {
                    return Some(PartOfSpeech::Verb);
                }
            }
        }

        None
    }
}

impl PosTagger for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let mut tokens = Vec::new();
        let mut context = Context {
            previous: None,
            previous_word: String::new(),
            sentence_start: true,
            capitalized: false,
        };

        for raw in text.split_whitespace() {
            let word = normalize(raw);
            let tail = raw.trim_end_matches(|c: char| {
                matches!(c, ')' | ']' | '"' | '\'' | '\u{201d}' | '\u{2019}')
            });
            let ends_clause = tail.ends_with(CLAUSE_END);
            let ends_sentence = tail.ends_with(SENTENCE_END);

            let tag = if word.is_empty() {
                PartOfSpeech::Punctuation
            } else {
                context.capitalized = raw
                    .chars()
                    .find(|c| c.is_alphanumeric())
                    .is_some_and(char::is_uppercase);
                self.classify(&word, &context)
            };

            if ends_clause || tag == PartOfSpeech::Punctuation {
                context.previous = None;
                context.previous_word.clear();
            } else {
                context.previous = Some(tag);
                context.previous_word.clone_from(&word);
            }
            context.sentence_start = ends_sentence;

            tokens.push(TaggedToken {
                word,
                tag,
                ends_clause,
            });
        }

        Ok(tokens)
    }
}

/// Look-behind state for a single token
struct Context {
    /// Tag of the preceding token in the same clause
    previous: Option<PartOfSpeech>,
    previous_word: String,
    sentence_start: bool,
    capitalized: bool,
}

fn resolve(entry: LexiconEntry, context: &Context) -> PartOfSpeech {
    match entry {
        LexiconEntry::Fixed(tag) => tag,
        LexiconEntry::NounOrVerb => {
            if context.previous_word == "to" {
                return PartOfSpeech::Verb;
            }
            match context.previous {
                Some(PartOfSpeech::Pronoun)
                | Some(PartOfSpeech::Auxiliary)
                | Some(PartOfSpeech::Adverb)
                | Some(PartOfSpeech::Interjection) => PartOfSpeech::Verb,
                _ => PartOfSpeech::Noun,
            }
        }
    }
}

fn classify_by_suffix(word: &str) -> Option<PartOfSpeech> {
    let len = word.chars().count();

    if len >= 5 && word.ends_with("ly") {
        return Some(PartOfSpeech::Adverb);
    }

    let adjective = (len >= 6
        && (word.ends_with("ous")
            || word.ends_with("ful")
            || word.ends_with("less")
            || word.ends_with("ive")
            || word.ends_with("ical")))
        || (len >= 7
            && (word.ends_with("able")
                || word.ends_with("ible")
                || word.ends_with("ish")
                || word.ends_with("iest")))
        || (len >= 5 && word.ends_with("ic"));

    adjective.then_some(PartOfSpeech::Adjective)
}

fn normalize(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
        .replace('\u{2019}', "'")
        .to_lowercase()
}

fn is_numeric(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':' | '/' | '-'))
}
