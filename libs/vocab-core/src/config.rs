//! Configuration state: the single document holding settings, the
//! vocabulary catalog and the learning log.
//!
//! Loading performs a default-filling merge: every field at every level
//! falls back to its default when absent from the file, and keys the
//! schema does not know are dropped. Saving overwrites the file wholesale.
//! The `appearance` and `shortcuts` sections are opaque UI pass-through
//! maps; the engine never interprets them.

use crate::error::Result;
use crate::records::LearningRecords;
use crate::scheduler::Strategy;
use crate::types::Vocabulary;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// General settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub daily_goal: u32,
    pub auto_start_float: bool,
    pub auto_save: bool,
    pub data_path: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            daily_goal: 20,
            auto_start_float: false,
            auto_save: true,
            data_path: String::new(),
        }
    }
}

/// Review strategy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    pub strategy: Strategy,
    /// Review days used when `strategy` is `custom`.
    pub intervals: Vec<u32>,
    /// New-word share (percent) when mixing new and review words.
    pub mix_ratio: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Ebbinghaus,
            intervals: vec![1, 2, 4, 7, 15],
            mix_ratio: 70,
        }
    }
}

fn default_appearance() -> Map<String, Value> {
    let Value::Object(map) = json!({
        "float_window_size": {"width": 400, "height": 250},
        "opacity": 95,
        "word_font_size": 20,
        "meaning_font_size": 14,
        "click_through": true,
        "theme": "default",
    }) else {
        unreachable!()
    };
    map
}

fn default_shortcuts() -> Map<String, Value> {
    let Value::Object(map) = json!({
        "toggle_float": "Ctrl+Space",
        "next_word": "Ctrl+Right",
        "prev_word": "Ctrl+Left",
        "speak_word": "Ctrl+S",
        "toggle_mode": "Ctrl+M",
    }) else {
        unreachable!()
    };
    map
}

/// Overlay loaded entries onto a default map, key by key. Keys the
/// defaults do not know are dropped; nested objects merge recursively so
/// a partial `float_window_size` keeps the other dimension's default.
fn overlay(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                overlay(existing, incoming)
            }
            (Some(slot), value) => *slot = value,
            (None, _) => {}
        }
    }
}

fn deserialize_appearance<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let loaded = Map::deserialize(deserializer)?;
    let mut map = default_appearance();
    overlay(&mut map, loaded);
    Ok(map)
}

fn deserialize_shortcuts<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let loaded = Map::deserialize(deserializer)?;
    let mut map = default_shortcuts();
    overlay(&mut map, loaded);
    Ok(map)
}

/// The whole configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSettings,
    /// Pass-through UI section: partial loads overlay the defaults.
    #[serde(deserialize_with = "deserialize_appearance")]
    pub appearance: Map<String, Value>,
    pub review: ReviewSettings,
    /// Pass-through UI section: partial loads overlay the defaults.
    #[serde(deserialize_with = "deserialize_shortcuts")]
    pub shortcuts: Map<String, Value>,
    pub vocabularies: Vec<Vocabulary>,
    pub learning_records: LearningRecords,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            appearance: default_appearance(),
            review: ReviewSettings::default(),
            shortcuts: default_shortcuts(),
            vocabularies: Vec::new(),
            learning_records: LearningRecords::default(),
        }
    }
}

impl Config {
    /// Look up a single setting by section and key, as a JSON value.
    /// `None` for unknown sections, unknown keys, and non-object sections.
    pub fn get_setting(&self, section: &str, key: &str) -> Option<Value> {
        let doc = serde_json::to_value(self).ok()?;
        doc.get(section)?.get(key)?.clone().into()
    }

    /// Update a single setting. Fails (returns false, state unchanged)
    /// when the section or key does not exist or the value does not fit
    /// the section's schema; never creates new keys.
    pub fn set_setting(&mut self, section: &str, key: &str, value: Value) -> bool {
        let Ok(mut doc) = serde_json::to_value(&*self) else {
            return false;
        };
        let Some(Value::Object(section_map)) = doc.get_mut(section) else {
            return false;
        };
        if !section_map.contains_key(key) {
            return false;
        }
        section_map.insert(key.to_string(), value);
        match serde_json::from_value(doc) {
            Ok(updated) => {
                *self = updated;
                true
            }
            Err(_) => false,
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the configuration from a file, filling every absent field with its
/// default. Any failure (missing file, unreadable, malformed) is logged
/// and yields the full default configuration.
pub fn load_config(path: impl AsRef<Path>) -> Config {
    let path = path.as_ref();
    match read_config(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to load config {}: {}", path.display(), err);
            Config::default()
        }
    }
}

/// Overwrite the configuration file. Returns false (and logs) on failure.
pub fn save_config(path: impl AsRef<Path>, config: &Config) -> bool {
    let path = path.as_ref();
    let result: Result<()> = (|| {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    })();
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("failed to save config {}: {}", path.display(), err);
            false
        }
    }
}

/// On-disk layout: the config file plus the directories for vocabulary
/// files and exported data.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub vocabularies_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl ConfigPaths {
    /// Layout rooted at an explicit base directory.
    pub fn in_dir(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_file: base.join("config.json"),
            vocabularies_dir: base.join("vocabularies"),
            data_dir: base.join("data"),
        }
    }

    /// Default layout under the user's local data directory.
    pub fn default_paths() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-core");
        Self::in_dir(base)
    }

    /// Create the directories if they do not exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        if let Some(parent) = self.config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&self.vocabularies_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.daily_goal, 20);
        assert!(config.general.auto_save);
        assert_eq!(config.review.strategy, Strategy::Ebbinghaus);
        assert_eq!(config.review.intervals, vec![1, 2, 4, 7, 15]);
        assert_eq!(config.review.mix_ratio, 70);
        assert!(config.vocabularies.is_empty());
        assert_eq!(config.appearance["opacity"], json!(95));
        assert_eq!(config.shortcuts["toggle_float"], json!("Ctrl+Space"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"general": {"daily_goal": 50}, "review": {"strategy": "srs"}}"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.general.daily_goal, 50);
        // Missing keys at every level fall back to defaults.
        assert!(config.general.auto_save);
        assert_eq!(config.review.strategy, Strategy::Srs);
        assert_eq!(config.review.mix_ratio, 70);
        assert_eq!(config.shortcuts, default_shortcuts());
    }

    #[test]
    fn partial_appearance_section_keeps_default_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"appearance": {"opacity": 80}}"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.appearance["opacity"], json!(80));
        // The keys the file does not mention keep their defaults.
        assert_eq!(
            config.get_setting("appearance", "theme"),
            Some(json!("default"))
        );
        assert_eq!(config.appearance["word_font_size"], json!(20));
        assert_eq!(config.appearance.len(), default_appearance().len());
    }

    #[test]
    fn partial_shortcuts_section_keeps_default_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"shortcuts": {"toggle_float": "F9"}}"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.shortcuts["toggle_float"], json!("F9"));
        assert_eq!(config.shortcuts["next_word"], json!("Ctrl+Right"));
        assert_eq!(config.shortcuts.len(), default_shortcuts().len());
    }

    #[test]
    fn nested_pass_through_objects_merge_key_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"appearance": {"float_window_size": {"width": 500}, "bogus": 1}}"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(
            config.appearance["float_window_size"],
            json!({"width": 500, "height": 250})
        );
        // Keys outside the default schema are dropped even here.
        assert_eq!(config.get_setting("appearance", "bogus"), None);
    }

    #[test]
    fn unknown_keys_are_dropped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"general": {"daily_goal": 5, "no_such_key": 1}, "no_such_section": {}}"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.general.daily_goal, 5);
        assert_eq!(config.get_setting("general", "no_such_key"), None);
        assert_eq!(config.get_setting("no_such_section", "x"), None);
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"general": {"daily_goal": 33}}"#).unwrap();

        let once = load_config(&path);
        let twice = load_config(&path);
        assert_eq!(once, twice);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.general.daily_goal = 42;
        config.review.strategy = Strategy::Custom;
        config.review.intervals = vec![2, 5, 9];
        config.vocabularies.push(Vocabulary {
            name: "CET6".into(),
            path: "cet6.json".into(),
            word_count: 2,
        });

        assert!(save_config(&path, &config));
        assert_eq!(load_config(&path), config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        assert_eq!(load_config("/nonexistent/config.json"), Config::default());
    }

    #[test]
    fn get_setting_reads_known_keys() {
        let config = Config::default();
        assert_eq!(config.get_setting("general", "daily_goal"), Some(json!(20)));
        assert_eq!(
            config.get_setting("review", "strategy"),
            Some(json!("ebbinghaus"))
        );
        assert_eq!(config.get_setting("general", "bogus"), None);
        // Array-valued sections have no keyed access.
        assert_eq!(config.get_setting("vocabularies", "0"), None);
    }

    #[test]
    fn set_setting_updates_only_existing_keys() {
        let mut config = Config::default();
        assert!(config.set_setting("general", "daily_goal", json!(99)));
        assert_eq!(config.general.daily_goal, 99);

        assert!(!config.set_setting("general", "new_key", json!(1)));
        assert!(!config.set_setting("nope", "daily_goal", json!(1)));
        assert_eq!(config.get_setting("general", "new_key"), None);
    }

    #[test]
    fn set_setting_rejects_ill_typed_values() {
        let mut config = Config::default();
        assert!(!config.set_setting("general", "daily_goal", json!("lots")));
        assert_eq!(config.general.daily_goal, 20);
    }

    #[test]
    fn set_setting_reaches_pass_through_sections() {
        let mut config = Config::default();
        assert!(config.set_setting("shortcuts", "toggle_float", json!("F9")));
        assert_eq!(config.shortcuts["toggle_float"], json!("F9"));
        assert!(!config.set_setting("shortcuts", "launch_missiles", json!("F10")));
    }

    #[test]
    fn ensure_dirs_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::in_dir(dir.path().join("app"));
        paths.ensure_dirs().unwrap();
        assert!(paths.vocabularies_dir.is_dir());
        assert!(paths.data_dir.is_dir());
    }
}
