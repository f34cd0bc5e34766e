//! Core vocabulary-learning library shared by the UI shells.
//!
//! Provides:
//! - Word and vocabulary-catalog types with their learning-state rules
//! - JSON vocabulary-file load/save
//! - The per-day learning-record log and status derivation
//! - Review scheduling (Ebbinghaus, fixed SRS, or custom interval days)
//! - The configuration document with default-filling load and keyed
//!   settings access
//! - [`LearningEngine`], the facade a host UI talks to

pub mod config;
pub mod engine;
pub mod error;
pub mod records;
pub mod scheduler;
pub mod types;
pub mod vocabulary;

pub use config::{Config, ConfigPaths, GeneralSettings, ReviewSettings};
pub use engine::LearningEngine;
pub use error::{Result, StoreError};
pub use records::{DailyRecord, LearningRecords, WordEvent};
pub use scheduler::{Strategy, EBBINGHAUS_INTERVALS, SRS_INTERVALS};
pub use types::{EventKind, Vocabulary, Word, WordId, WordStatus};
