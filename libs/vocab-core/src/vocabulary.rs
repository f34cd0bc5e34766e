//! Vocabulary file load/save.
//!
//! # Format
//! A vocabulary file is UTF-8 JSON holding word records, either as a bare
//! array:
//! ```json
//! [{"word": "abandon", "meaning": "v. 放弃", "phonetic": "/əˈbændən/"}]
//! ```
//! or wrapped in an object under `"words"` (legacy files use `"verbs"`):
//! ```json
//! {"name": "CET6", "words": [{"word": "abandon", "meaning": "v. 放弃"}]}
//! ```
//!
//! The store is stateless: every load re-reads the file, and a missing or
//! malformed file yields an empty list rather than an error.

use crate::error::Result;
use crate::types::Word;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A vocabulary file in either of its accepted shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VocabularyFile {
    Bare(Vec<Word>),
    Wrapped {
        #[serde(alias = "verbs")]
        words: Vec<Word>,
    },
}

impl VocabularyFile {
    fn into_words(self) -> Vec<Word> {
        match self {
            Self::Bare(words) => words,
            Self::Wrapped { words } => words,
        }
    }
}

fn read_words(path: &Path) -> Result<Vec<Word>> {
    let content = fs::read_to_string(path)?;
    let file: VocabularyFile = serde_json::from_str(&content)?;
    Ok(file.into_words())
}

/// Load all words from a vocabulary file.
///
/// Returns an empty list if the file is missing, unreadable or malformed;
/// the failure is logged, never surfaced.
pub fn load_words(path: impl AsRef<Path>) -> Vec<Word> {
    let path = path.as_ref();
    match read_words(path) {
        Ok(words) => words,
        Err(err) => {
            tracing::warn!("failed to load vocabulary {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

/// Serialize the full word list back to its file, overwriting the previous
/// contents. Returns false (and logs) on failure.
pub fn save_words(path: impl AsRef<Path>, words: &[Word]) -> bool {
    let path = path.as_ref();
    let result: Result<()> = (|| {
        let content = serde_json::to_string_pretty(words)?;
        fs::write(path, content)?;
        Ok(())
    })();
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("failed to save vocabulary {}: {}", path.display(), err);
            false
        }
    }
}
