//! The engine facade: the API surface a UI shell talks to.
//!
//! Owns the configuration document (catalog, settings, learning log) and
//! wires the stores and the scheduler together. Persistence is explicit:
//! catalog changes save immediately, study events save only when
//! `general.auto_save` is on, and everything else waits for [`LearningEngine::save`].

use crate::config::{self, Config, ConfigPaths};
use crate::records::DailyRecord;
use crate::types::{EventKind, Vocabulary, Word, WordId};
use crate::vocabulary;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde_json::Value;
use std::path::Path;

/// The vocabulary-learning engine.
pub struct LearningEngine {
    config: Config,
    paths: Option<ConfigPaths>,
}

impl LearningEngine {
    /// Open the engine against an on-disk layout: create the directories
    /// and load the configuration (defaults on a fresh install).
    pub fn open(paths: ConfigPaths) -> Self {
        if let Err(err) = paths.ensure_dirs() {
            tracing::warn!("failed to create data directories: {}", err);
        }
        let mut config = config::load_config(&paths.config_file);
        if config.general.data_path.is_empty() {
            config.general.data_path = paths.data_dir.to_string_lossy().into_owned();
        }
        Self {
            config,
            paths: Some(paths),
        }
    }

    /// Engine over an in-memory configuration; nothing is persisted.
    pub fn with_config(config: Config) -> Self {
        Self { config, paths: None }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Persist the configuration document. A no-op success for in-memory
    /// engines.
    pub fn save(&self) -> bool {
        match &self.paths {
            Some(paths) => config::save_config(&paths.config_file, &self.config),
            None => true,
        }
    }

    // --- vocabulary catalog ---

    /// The catalog, in insertion order.
    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.config.vocabularies
    }

    /// Append a vocabulary to the catalog and persist immediately.
    pub fn add_vocabulary(
        &mut self,
        name: impl Into<String>,
        path: impl Into<String>,
        word_count: usize,
    ) {
        self.config.vocabularies.push(Vocabulary {
            name: name.into(),
            path: path.into(),
            word_count,
        });
        self.save();
    }

    /// Remove a catalog entry by index and persist. Returns false when the
    /// index is out of bounds. The underlying word file is not touched.
    pub fn remove_vocabulary(&mut self, index: usize) -> bool {
        if index >= self.config.vocabularies.len() {
            return false;
        }
        self.config.vocabularies.remove(index);
        self.save();
        true
    }

    /// Load the words of a vocabulary file. Empty on any storage failure.
    pub fn load_words(&self, path: impl AsRef<Path>) -> Vec<Word> {
        vocabulary::load_words(path)
    }

    /// Write a vocabulary file back. False on any storage failure.
    pub fn save_words(&self, path: impl AsRef<Path>, words: &[Word]) -> bool {
        vocabulary::save_words(path, words)
    }

    // --- learning log ---

    /// Record a study event for today; persists when auto-save is on.
    pub fn record_event(&mut self, word_id: WordId, kind: EventKind, timestamp: f64) {
        self.record_event_on(Local::now().date_naive(), word_id, kind, timestamp);
    }

    /// Record a study event on an explicit date; persists when auto-save
    /// is on.
    pub fn record_event_on(
        &mut self,
        date: NaiveDate,
        word_id: WordId,
        kind: EventKind,
        timestamp: f64,
    ) {
        self.config
            .learning_records
            .record_event_on(date, word_id, kind, timestamp);
        if self.config.general.auto_save {
            self.save();
        }
    }

    /// Today's counters and touched words; zeroes if nothing was studied.
    pub fn today_stats(&self) -> DailyRecord {
        self.config.learning_records.today_stats()
    }

    /// Latest recorded status for a word, or `None` if it never appears in
    /// the log (distinct from "known but unlearned").
    pub fn word_status(&self, word_id: &WordId) -> Option<EventKind> {
        self.config.learning_records.word_status(word_id)
    }

    /// Timestamp of the word's most recent study event.
    pub fn last_study_time(&self, word_id: &WordId) -> Option<f64> {
        self.config.learning_records.last_study_time(word_id)
    }

    /// Words of a vocabulary whose derived status matches `filter`;
    /// `None` returns every word.
    pub fn words_by_status(
        &self,
        vocab_path: &str,
        filter: Option<EventKind>,
    ) -> Vec<Word> {
        let words = vocabulary::load_words(vocab_path);
        match filter {
            None => words,
            Some(kind) => words
                .into_iter()
                .filter(|word| {
                    let id = WordId::new(vocab_path, word.word.clone());
                    self.word_status(&id) == Some(kind)
                })
                .collect(),
        }
    }

    /// Words of a vocabulary due for review now.
    pub fn review_words(&self, vocab_path: &str) -> Vec<Word> {
        self.review_words_at(vocab_path, Utc::now())
    }

    /// Words due for review as of `now`: derived status must be
    /// review-eligible, a last study time must exist, and the whole days
    /// elapsed since it must be exactly one of the active strategy's
    /// interval days.
    pub fn review_words_at(&self, vocab_path: &str, now: DateTime<Utc>) -> Vec<Word> {
        let strategy = self.config.review.strategy;
        let custom_intervals = &self.config.review.intervals;

        vocabulary::load_words(vocab_path)
            .into_iter()
            .filter(|word| {
                let id = WordId::new(vocab_path, word.word.clone());
                let eligible = self
                    .word_status(&id)
                    .is_some_and(EventKind::is_review_eligible);
                if !eligible {
                    return false;
                }
                let Some(days) = self.last_study_time(&id).and_then(|ts| elapsed_days(ts, now))
                else {
                    return false;
                };
                strategy.is_due(days, custom_intervals)
            })
            .collect()
    }

    // --- settings ---

    /// Read a setting; `None` for unknown sections or keys.
    pub fn get_setting(&self, section: &str, key: &str) -> Option<Value> {
        self.config.get_setting(section, key)
    }

    /// Update a setting; false for unknown sections/keys or ill-typed
    /// values. Never creates new keys.
    pub fn set_setting(&mut self, section: &str, key: &str, value: Value) -> bool {
        self.config.set_setting(section, key, value)
    }
}

/// Whole days elapsed from an epoch-seconds timestamp to `now`. `None` for
/// timestamps that cannot be represented or lie in the future.
fn elapsed_days(timestamp: f64, now: DateTime<Utc>) -> Option<u32> {
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9) as u32;
    let then = DateTime::from_timestamp(secs as i64, nanos)?;
    u32::try_from((now - then).num_days()).ok()
}
