//! Word tables for the rule-based part-of-speech tagger
//!
//! The built-in tables cover closed word classes (determiners, pronouns,
//! prepositions, conjunctions, auxiliaries) plus the open-class words that
//! show up most in product reviews and that the suffix rules would otherwise
//! get wrong. Everything not listed falls through to suffix rules and finally
//! to "noun".
//!
//! Extra words can be supplied as a TOML file:
//!
//! ```toml
//! adjectives = ["snappy", "janky"]
//! adverbs = ["lowkey"]
//! nouns = ["firmware"]
//! verbs = ["reboot"]
//! ambiguous = ["ping"]   # noun or verb, resolved from context
//! ```

use crate::error::{KudosError, Result};
use crate::scoring::tagger::PartOfSpeech;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "any", "no", "every", "each", "all", "both", "either", "neither", "another",
    "such", "what", "which", "whose", "much", "many", "few", "several", "more", "most", "less",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "themselves", "mine", "yours", "hers", "ours",
    "theirs", "someone", "anyone", "everyone", "somebody", "anybody", "everybody", "something",
    "anything", "everything", "nothing", "nobody", "who", "whom", "there", "i'm", "i've", "i'd",
    "i'll", "you're", "you've", "you'll", "he's", "she's", "it's", "we're", "we've", "they're",
    "they've", "that's", "there's", "what's", "who's",
];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "over", "under",
    "around", "among", "without", "within", "across", "behind", "beyond", "near", "since",
    "until", "upon", "via", "per", "than", "out", "off", "onto", "toward", "towards", "despite",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "whereas",
    "if", "unless", "whether", "as", "whenever", "wherever", "when", "where", "why", "how",
];

const AUXILIARIES: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has",
    "had", "having", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "don't", "doesn't", "didn't", "can't", "cannot", "won't", "isn't", "wasn't", "aren't",
    "weren't", "couldn't", "wouldn't", "shouldn't", "haven't", "hasn't", "hadn't",
];

const INTERJECTIONS: &[&str] = &[
    "wow", "oh", "ugh", "hey", "yay", "meh", "thanks", "thank", "hmm", "yes", "please", "ok",
    "okay",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "fifty", "hundred", "thousand", "million", "dozen",
];

const ADVERBS: &[&str] = &[
    "not", "very", "really", "quite", "too", "also", "just", "only", "even", "still", "already",
    "always", "never", "often", "sometimes", "usually", "rarely", "again", "almost", "rather",
    "pretty", "well", "soon", "now", "then", "here", "ever", "instead", "however", "maybe",
    "perhaps", "enough", "else", "together", "away", "back", "anyway", "later", "today",
    "yesterday", "tomorrow", "overall", "ago", "once", "twice", "indeed", "somewhat", "seldom",
    "otherwise", "therefore", "meanwhile", "forever", "outright",
];

const ADJECTIVES: &[&str] = &[
    "good", "great", "bad", "poor", "better", "best", "worse", "worst", "nice", "excellent",
    "terrible", "awful", "amazing", "awesome", "horrible", "fine", "cheap", "expensive", "slow",
    "fast", "quick", "easy", "hard", "difficult", "simple", "new", "old", "big", "small", "large",
    "little", "long", "short", "high", "low", "happy", "sad", "clean", "dirty", "broken",
    "friendly", "lovely", "ugly", "early", "likely", "same", "different", "whole", "full", "empty",
    "strong", "weak", "hot", "cold", "warm", "wrong", "right", "sure", "free", "real", "true",
    "false", "clear", "unclear", "main", "other", "first", "last", "next", "perfect", "solid",
    "smooth", "rough", "loud", "quiet", "bright", "dark", "heavy", "late", "thin", "thick",
    "wide", "narrow", "flimsy", "sturdy", "decent", "mediocre", "superb", "fantastic", "fair",
    "disappointing", "annoying", "confusing", "frustrating", "boring", "satisfied",
    "dissatisfied", "disappointed", "frustrated", "annoyed", "confused", "unhappy", "rude",
    "kind", "polite", "safe", "unsafe", "faulty", "buggy", "laggy", "sluggish", "outdated",
    "overpriced", "worth", "ready", "able", "unable", "glad", "sorry", "crazy", "tiny", "huge",
    "okay-ish", "average", "basic", "extra", "key", "minor", "major", "tight", "loose", "soft",
    "stiff", "sharp", "dull", "flat", "stale", "fresh", "noisy", "shiny", "sleek", "neat",
];

const NOUNS: &[&str] = &[
    "family", "assembly", "belly", "jelly", "rally", "anomaly", "butterfly", "music", "topic",
    "logic", "traffic", "fabric", "clinic", "mechanic", "vegetable", "archive", "time", "people",
    "thing", "things", "way", "day", "week", "month", "year", "money", "customer", "app",
    "quality", "material", "box", "item", "seller", "staff", "team", "website", "site", "phone",
    "battery", "screen", "button", "manual", "warranty", "refund", "instructions",
];

const VERBS: &[&str] = &[
    "get", "got", "gets", "make", "made", "makes", "buy", "bought", "go", "went", "goes", "gone",
    "come", "came", "comes", "take", "took", "taken", "give", "gave", "given", "say", "said",
    "know", "knew", "want", "wanted", "like", "liked", "recommend", "recommended", "suggest",
    "suggested", "expect", "expected", "arrive", "arrived", "seem", "seems", "seemed", "feel",
    "felt", "keep", "kept", "broke", "tried", "receive", "received", "install", "installed",
    "consider", "improve", "improved", "enhance", "modify", "adjust", "prefer", "preferred",
    "add", "added", "wish", "let", "put", "find", "found", "tell", "told", "ask", "asked",
    "show", "showed", "paid", "apply", "reply", "supply", "comply", "rely", "imply", "multiply",
    "finish", "polish", "publish", "stopped", "lasted", "became", "become", "becomes", "worked",
    "ordered", "returned", "loved", "hated", "needed", "waited", "helped", "crashed", "freezes",
    "froze", "frozen", "fails", "failed", "fail", "says", "think", "thinks", "guess", "lacks",
    "wasted", "waste", "enjoy", "enjoyed", "hope", "hoped", "deliver", "delivered",
];

/// Words that are nouns after a determiner or adjective and verbs after a
/// pronoun, auxiliary or "to"
const NOUN_OR_VERB: &[&str] = &[
    "design", "fix", "update", "support", "issue", "use", "work", "order", "return", "need",
    "love", "hate", "look", "change", "crash", "report", "stop", "charge", "upgrade", "address",
    "help", "call", "wait", "pay", "review", "test", "experience", "lack", "request", "answer",
    "cost", "price", "plan", "drop", "display", "control", "process", "result", "set", "start",
    "end", "break", "fit", "package", "sound", "light", "run", "ship", "try", "freeze", "feature",
    "respond", "load", "refund", "service", "contact", "rate", "matter", "mind", "care",
];

/// Word lists supplied by an external lexicon file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LexiconFile {
    adjectives: Vec<String>,
    adverbs: Vec<String>,
    nouns: Vec<String>,
    verbs: Vec<String>,
    ambiguous: Vec<String>,
}

/// What the lexicon knows about a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconEntry {
    /// Unambiguous part of speech
    Fixed(PartOfSpeech),

    /// Noun or verb depending on the preceding word
    NounOrVerb,
}

/// Lookup table from lowercase word to lexicon entry
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
}

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let mut lexicon = Lexicon::default();

    // Later tables win, so open classes come first and closed classes last
    lexicon.insert_all(NOUNS, LexiconEntry::Fixed(PartOfSpeech::Noun));
    lexicon.insert_all(NOUN_OR_VERB, LexiconEntry::NounOrVerb);
    lexicon.insert_all(VERBS, LexiconEntry::Fixed(PartOfSpeech::Verb));
    lexicon.insert_all(ADJECTIVES, LexiconEntry::Fixed(PartOfSpeech::Adjective));
    lexicon.insert_all(ADVERBS, LexiconEntry::Fixed(PartOfSpeech::Adverb));
    lexicon.insert_all(NUMBER_WORDS, LexiconEntry::Fixed(PartOfSpeech::Number));
    lexicon.insert_all(INTERJECTIONS, LexiconEntry::Fixed(PartOfSpeech::Interjection));
    lexicon.insert_all(CONJUNCTIONS, LexiconEntry::Fixed(PartOfSpeech::Conjunction));
    lexicon.insert_all(PREPOSITIONS, LexiconEntry::Fixed(PartOfSpeech::Preposition));
    lexicon.insert_all(AUXILIARIES, LexiconEntry::Fixed(PartOfSpeech::Auxiliary));
    lexicon.insert_all(PRONOUNS, LexiconEntry::Fixed(PartOfSpeech::Pronoun));
    lexicon.insert_all(DETERMINERS, LexiconEntry::Fixed(PartOfSpeech::Determiner));

    lexicon
});

impl Lexicon {
    /// The built-in English review lexicon
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Parse an extension lexicon from TOML text
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(source)
            .map_err(|e| KudosError::TaggingUnavailable(format!("Invalid lexicon: {}", e)))?;

        let mut lexicon = Lexicon::default();
        lexicon.insert_owned(&file.nouns, LexiconEntry::Fixed(PartOfSpeech::Noun));
        lexicon.insert_owned(&file.ambiguous, LexiconEntry::NounOrVerb);
        lexicon.insert_owned(&file.verbs, LexiconEntry::Fixed(PartOfSpeech::Verb));
        lexicon.insert_owned(&file.adjectives, LexiconEntry::Fixed(PartOfSpeech::Adjective));
        lexicon.insert_owned(&file.adverbs, LexiconEntry::Fixed(PartOfSpeech::Adverb));
        Ok(lexicon)
    }

    /// Load an extension lexicon from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            KudosError::TaggingUnavailable(format!(
                "Failed to read lexicon {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&source)
    }

    /// Look up a normalized (lowercase) word
    pub fn lookup(&self, word: &str) -> Option<LexiconEntry> {
        self.entries.get(word).copied()
    }

    /// Number of words in this table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_all(&mut self, words: &[&str], entry: LexiconEntry) {
        for word in words {
            self.entries.insert((*word).to_string(), entry);
        }
    }

    fn insert_owned(&mut self, words: &[String], entry: LexiconEntry) {
        for word in words {
            self.entries.insert(word.trim().to_lowercase(), entry);
        }
    }
}
