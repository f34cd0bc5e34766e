//! Learning record store: per-day log of study events.
//!
//! Each calendar day holds event counters plus the last event recorded for
//! every word touched that day. Re-recording a word on the same day
//! overwrites its earlier entry; the store keeps no event history beyond
//! last-event-of-the-day. Days accumulate indefinitely.
//!
//! Status and last-study-time derivation scan the whole log. That is
//! O(days × words-per-day) and fine at personal-tool scale; if it ever
//! isn't, an index from word id to latest event can be added behind these
//! same methods.

use crate::types::{EventKind, WordId};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Last event recorded for a word within one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordEvent {
    pub status: EventKind,
    /// Seconds since the Unix epoch, fractional.
    pub timestamp: f64,
}

/// One calendar day's study record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyRecord {
    pub new_words: u32,
    pub review_words: u32,
    pub test_words: u32,
    #[serde(with = "word_map")]
    pub words: HashMap<WordId, WordEvent>,
}

/// The full learning log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningRecords {
    pub last_study_date: Option<NaiveDate>,
    pub daily_records: BTreeMap<NaiveDate, DailyRecord>,
}

impl LearningRecords {
    /// Record a study event for today (local time).
    pub fn record_event(&mut self, word_id: WordId, kind: EventKind, timestamp: f64) {
        self.record_event_on(Local::now().date_naive(), word_id, kind, timestamp);
    }

    /// Record a study event on an explicit calendar date.
    ///
    /// The day's record is created lazily; a second event for the same word
    /// on the same day replaces the first. Counters track events as they
    /// arrive, so an overwritten entry still counts toward the kind it was
    /// recorded with.
    pub fn record_event_on(
        &mut self,
        date: NaiveDate,
        word_id: WordId,
        kind: EventKind,
        timestamp: f64,
    ) {
        let record = self.daily_records.entry(date).or_default();
        record.words.insert(word_id, WordEvent { status: kind, timestamp });

        match kind {
            EventKind::New => record.new_words += 1,
            EventKind::Review => record.review_words += 1,
            EventKind::Test => record.test_words += 1,
            _ => {}
        }

        self.last_study_date = Some(date);
    }

    /// Today's record, or a zero-valued one if nothing has been recorded
    /// yet. Never creates the day.
    pub fn today_stats(&self) -> DailyRecord {
        self.stats_on(Local::now().date_naive())
    }

    /// The record for an explicit date, or a zero-valued one.
    pub fn stats_on(&self, date: NaiveDate) -> DailyRecord {
        self.daily_records.get(&date).cloned().unwrap_or_default()
    }

    /// Latest recorded status for a word across all days, or `None` if the
    /// word never appears in the log.
    pub fn word_status(&self, word_id: &WordId) -> Option<EventKind> {
        self.latest_event(word_id).map(|event| event.status)
    }

    /// Timestamp of the word's most recent study event, or `None`.
    pub fn last_study_time(&self, word_id: &WordId) -> Option<f64> {
        self.latest_event(word_id).map(|event| event.timestamp)
    }

    fn latest_event(&self, word_id: &WordId) -> Option<WordEvent> {
        let mut latest: Option<WordEvent> = None;
        for record in self.daily_records.values() {
            if let Some(event) = record.words.get(word_id) {
                if latest.map_or(true, |best| event.timestamp > best.timestamp) {
                    latest = Some(*event);
                }
            }
        }
        latest
    }
}

/// Serialize the per-day word map as an array of structured entries.
///
/// JSON object keys must be strings, and joining the composite word id
/// into one string would reintroduce the separator-collision problem the
/// structured key exists to avoid.
mod word_map {
    use super::{EventKind, WordEvent, WordId};
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        vocabulary: String,
        word: String,
        status: EventKind,
        timestamp: f64,
    }

    pub fn serialize<S>(map: &HashMap<WordId, WordEvent>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for (id, event) in map {
            seq.serialize_element(&Entry {
                vocabulary: id.vocabulary.clone(),
                word: id.word.clone(),
                status: event.status,
                timestamp: event.timestamp,
            })?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<WordId, WordEvent>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                (
                    WordId::new(entry.vocabulary, entry.word),
                    WordEvent {
                        status: entry.status,
                        timestamp: entry.timestamp,
                    },
                )
            })
            .collect())
    }
}
