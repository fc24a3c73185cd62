//! Per-character user preferences with write-through persistence.
//!
//! Two facts are remembered per character: the selected level of each
//! ability and the selected memory grade. Keys are typed ([`PrefKey`]) and
//! serialized through a single boundary into the flat string keys of the
//! backing store (`{character}_{ability}_level`, `{character}_memory_grade`).
//!
//! The store never fails the caller: unreadable or corrupt state degrades
//! to defaults on read, and a failed write is logged and swallowed.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::model::Grade;

/// Level reported when nothing valid is stored for an ability.
pub const DEFAULT_ABILITY_LEVEL: u8 = 1;

/// A typed preference key.
///
/// Character and ability ids are hyphen-delimited slugs; `_` is reserved
/// as the storage-key separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefKey {
    AbilityLevel { character: String, ability: String },
    MemoryGrade { character: String },
}

impl PrefKey {
    pub fn ability_level(character: &str, ability: &str) -> Self {
        PrefKey::AbilityLevel {
            character: character.to_string(),
            ability: ability.to_string(),
        }
    }

    pub fn memory_grade(character: &str) -> Self {
        PrefKey::MemoryGrade {
            character: character.to_string(),
        }
    }

    /// Flat storage-key form.
    pub fn storage_key(&self) -> String {
        match self {
            PrefKey::AbilityLevel { character, ability } => {
                format!("{character}_{ability}_level")
            }
            PrefKey::MemoryGrade { character } => format!("{character}_memory_grade"),
        }
    }

    /// Parse a flat storage key back into a typed key.
    pub fn parse(key: &str) -> Option<PrefKey> {
        if let Some(character) = key.strip_suffix("_memory_grade") {
            if character.is_empty() {
                return None;
            }
            return Some(PrefKey::memory_grade(character));
        }
        let rest = key.strip_suffix("_level")?;
        let (character, ability) = rest.split_once('_')?;
        if character.is_empty() || ability.is_empty() {
            return None;
        }
        Some(PrefKey::ability_level(character, ability))
    }
}

/// File-backed preference store. Reads happen against an in-memory map
/// loaded once at open; every mutation writes straight back to disk.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Open the store at `path`, treating a missing or unreadable file as
    /// an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!(
                        "corrupt preference file at {} ({e}) - starting empty",
                        path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    /// Stored level for an ability; [`DEFAULT_ABILITY_LEVEL`] when unset or
    /// not a valid integer. Callers clamp to the ability's `max_level`.
    pub fn ability_level(&self, character: &str, ability: &str) -> u8 {
        self.get(&PrefKey::ability_level(character, ability))
            .and_then(|raw| raw.parse::<u8>().ok())
            .unwrap_or(DEFAULT_ABILITY_LEVEL)
    }

    pub fn set_ability_level(&mut self, character: &str, ability: &str, level: u8) {
        self.set(PrefKey::ability_level(character, ability), level.to_string());
    }

    /// Stored memory grade; `Grade::I` when unset or not a valid token.
    pub fn memory_grade(&self, character: &str) -> Grade {
        self.get(&PrefKey::memory_grade(character))
            .and_then(Grade::parse)
            .unwrap_or(Grade::I)
    }

    pub fn set_memory_grade(&mut self, character: &str, grade: Grade) {
        self.set(PrefKey::memory_grade(character), grade.as_str().to_string());
    }

    fn get(&self, key: &PrefKey) -> Option<&str> {
        self.values.get(&key.storage_key()).map(String::as_str)
    }

    fn set(&mut self, key: PrefKey, value: String) {
        self.values.insert(key.storage_key(), value);
        self.flush();
    }

    /// Write-through. Failure is logged, never surfaced.
    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.values) {
            Ok(serialized) => {
                if let Err(e) = fs::write(&self.path, serialized) {
                    log::warn!("failed to persist preferences to {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("failed to serialize preferences: {e}"),
        }
    }
}
