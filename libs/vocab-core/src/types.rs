//! Core types for the vocabulary learning engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Intrinsic learning status carried by a word inside its vocabulary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStatus {
    Unlearned,
    Learned,
    Skipped,
    Favorite,
}

impl Default for WordStatus {
    fn default() -> Self {
        Self::Unlearned
    }
}

/// Kind of learning event recorded in the daily log.
///
/// `New`, `Review` and `Test` drive the daily counters; `Learned` and
/// `Reviewed` are the derived statuses that make a word eligible for
/// review scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    New,
    Learned,
    Review,
    Reviewed,
    Test,
    Skipped,
}

impl EventKind {
    /// Event kind identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learned => "learned",
            Self::Review => "review",
            Self::Reviewed => "reviewed",
            Self::Test => "test",
            Self::Skipped => "skipped",
        }
    }

    /// Whether a word whose latest event is this kind belongs in the
    /// review queue.
    pub fn is_review_eligible(self) -> bool {
        matches!(self, Self::Learned | Self::Reviewed)
    }
}

/// Composite identifier for a word: the owning vocabulary's file path plus
/// the word text. Uniqueness is only guaranteed within one vocabulary.
///
/// Kept structured rather than joined into a `path:word` string so that a
/// separator character appearing in either part cannot collide keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordId {
    pub vocabulary: String,
    pub word: String,
}

impl WordId {
    pub fn new(vocabulary: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            vocabulary: vocabulary.into(),
            word: word.into(),
        }
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vocabulary, self.word)
    }
}

/// Tags may appear in vocabulary files either as a `tags` array or as the
/// legacy scalar `word_type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TagField {
    Many(Vec<String>),
    One(String),
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let field = Option::<TagField>::deserialize(deserializer)?;
    Ok(match field {
        Some(TagField::Many(tags)) => tags,
        Some(TagField::One(tag)) => vec![tag],
        None => Vec::new(),
    })
}

/// One vocabulary word and its learning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(
        default,
        alias = "word_type",
        deserialize_with = "deserialize_tags"
    )]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: WordStatus,
    #[serde(default)]
    pub learn_count: u32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_learn_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_time: Option<f64>,
    #[serde(default)]
    pub mastery_level: u8,
}

impl Word {
    /// Create a fresh, unlearned word.
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            phonetic: None,
            examples: Vec::new(),
            tags: Vec::new(),
            status: WordStatus::Unlearned,
            learn_count: 0,
            review_count: 0,
            last_learn_time: None,
            next_review_time: None,
            mastery_level: 0,
        }
    }

    /// Mark as learned: sets status, bumps the learn counter and records
    /// the study time.
    pub fn mark_learned(&mut self, timestamp: f64) {
        self.status = WordStatus::Learned;
        self.learn_count += 1;
        self.last_learn_time = Some(timestamp);
    }

    /// Mark as reviewed: bumps the review counter and records the study
    /// time. Status is left untouched.
    pub fn mark_reviewed(&mut self, timestamp: f64) {
        self.review_count += 1;
        self.last_learn_time = Some(timestamp);
    }

    /// Mark as skipped.
    pub fn mark_skipped(&mut self) {
        self.status = WordStatus::Skipped;
    }

    /// Toggle the favorite status and return the new favorite flag.
    ///
    /// Turning favorite off restores `Learned` if the word has ever been
    /// learned, else `Unlearned`. The status held before favoriting is not
    /// saved anywhere, so this transition is lossy for `Skipped` words.
    pub fn toggle_favorite(&mut self) -> bool {
        if self.status == WordStatus::Favorite {
            self.status = if self.learn_count > 0 {
                WordStatus::Learned
            } else {
                WordStatus::Unlearned
            };
            false
        } else {
            self.status = WordStatus::Favorite;
            true
        }
    }

    /// Set the mastery level. Returns false and leaves the word unchanged
    /// when `level` is outside 0..=5.
    pub fn update_mastery_level(&mut self, level: u8) -> bool {
        if level <= 5 {
            self.mastery_level = level;
            true
        } else {
            false
        }
    }
}

/// Catalog entry for one vocabulary (a named word list backed by a file).
///
/// `word_count` is a cached display value captured at import time; it may
/// drift from the actual file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub word_count: usize,
}
