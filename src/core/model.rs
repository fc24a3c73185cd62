//! Data model for character records and reference catalogs.
//!
//! All types deserialize straight from the catalog JSON files. Field names
//! in the JSON are the Spanish identifiers used by the data set; Rust-side
//! names are English with serde renames. Records are immutable once loaded.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Grades ──────────────────────────────────────────────────────────────────

/// The five-tier token used by resonances and memory grades.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    I,
    II,
    III,
    IV,
    V,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::I, Grade::II, Grade::III, Grade::IV, Grade::V];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::I => "I",
            Grade::II => "II",
            Grade::III => "III",
            Grade::IV => "IV",
            Grade::V => "V",
        }
    }

    /// Parse one of the five grade tokens. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Grade> {
        Grade::ALL.iter().copied().find(|g| g.as_str() == s)
    }

    /// Character level required to unlock this resonance tier.
    pub fn resonance_threshold(self) -> u8 {
        match self {
            Grade::I => 4,
            Grade::II => 6,
            Grade::III => 8,
            Grade::IV => 10,
            Grade::V => 12,
        }
    }

    /// Next grade, saturating at `V`.
    pub fn next(self) -> Grade {
        let idx = Grade::ALL.iter().position(|&g| g == self).unwrap_or(0);
        Grade::ALL[(idx + 1).min(Grade::ALL.len() - 1)]
    }

    /// Previous grade, saturating at `I`.
    pub fn prev(self) -> Grade {
        let idx = Grade::ALL.iter().position(|&g| g == self).unwrap_or(0);
        Grade::ALL[idx.saturating_sub(1)]
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Stats ───────────────────────────────────────────────────────────────────

/// Base stat block: seven named integer stats, scale 0-2000.
#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    #[serde(rename = "colocacion")]
    pub setting: u32,
    #[serde(rename = "saque")]
    pub serve: u32,
    #[serde(rename = "recuperacion")]
    pub recovery: u32,
    #[serde(rename = "bloqueo")]
    pub block: u32,
    #[serde(rename = "recepcion")]
    pub receive: u32,
    #[serde(rename = "ataque_rapido")]
    pub quick_attack: u32,
    #[serde(rename = "ataque_poderoso")]
    pub power_attack: u32,
}

impl Stats {
    /// Display label / value pairs in chart order.
    pub fn labeled(&self) -> [(&'static str, u32); 7] {
        [
            ("Colocación", self.setting),
            ("Saque", self.serve),
            ("Recuperación", self.recovery),
            ("Bloqueo", self.block),
            ("Recepción", self.receive),
            ("Ataque Rápido", self.quick_attack),
            ("Ataque Poderoso", self.power_attack),
        ]
    }
}

/// Memory stat-boost block: six named integer deltas, scale 0-1000.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsBoost {
    #[serde(rename = "colocacion")]
    pub setting: u32,
    #[serde(rename = "saque")]
    pub serve: u32,
    #[serde(rename = "recuperacion")]
    pub recovery: u32,
    #[serde(rename = "bloqueo")]
    pub block: u32,
    #[serde(rename = "recepcion")]
    pub receive: u32,
    #[serde(rename = "remate")]
    pub spike: u32,
}

impl StatsBoost {
    pub fn labeled(&self) -> [(&'static str, u32); 6] {
        [
            ("Colocación", self.setting),
            ("Saque", self.serve),
            ("Recuperación", self.recovery),
            ("Bloqueo", self.block),
            ("Recepción", self.receive),
            ("Remate", self.spike),
        ]
    }
}

// ── Abilities ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    #[default]
    Normal,
    Ultimate,
}

/// A character ability with per-level descriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    /// Localized display name; falls back to `name` when absent.
    #[serde(default)]
    pub name_es: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: AbilityKind,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Highest selectable level, >= 1.
    pub max_level: u8,
    /// Level -> description text.
    #[serde(default)]
    pub descriptions: BTreeMap<u8, String>,
    #[serde(default)]
    pub icon: String,
}

impl Ability {
    pub fn display_name(&self) -> &str {
        self.name_es.as_deref().unwrap_or(&self.name)
    }

    pub fn description(&self, level: u8) -> Option<&str> {
        self.descriptions.get(&level).map(String::as_str)
    }

    /// Clamp a stored/requested level into `[1, max_level]`.
    pub fn clamp_level(&self, level: u8) -> u8 {
        level.clamp(1, self.max_level.max(1))
    }
}

// ── Memory ──────────────────────────────────────────────────────────────────

/// A character's memory item: leveled bonus with grade-exclusive effects.
#[derive(Debug, Clone, Deserialize)]
pub struct Memory {
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub image: String,
    /// Grade -> exclusive effect text.
    #[serde(default)]
    pub exclusive_effects: BTreeMap<Grade, String>,
    pub stats_boost: StatsBoost,
}

// ── Characters ──────────────────────────────────────────────────────────────

/// One playable character record, loaded from `characters/{id}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_kanji: Option<String>,
    #[serde(default)]
    pub image_card: String,
    #[serde(default)]
    pub image_profile: String,
    pub rarity: String,
    #[serde(rename = "id_school")]
    pub school: String,
    pub position: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub stats: Stats,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    /// Resonance tier -> description.
    #[serde(default)]
    pub resonances: BTreeMap<Grade, String>,
    #[serde(default)]
    pub memory: Option<Memory>,
}

// ── Catalog entries ─────────────────────────────────────────────────────────

/// An entry in one of the static lookup catalogs
/// (schools, positions, rarities, specialties).
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

// ── Bonds ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum BondKind {
    /// Per-character leveled attribute bonus.
    #[serde(rename = "bonus")]
    Bonus,
    /// Shared leveled ability effect.
    #[serde(rename = "alineacion")]
    Lineup,
}

/// A named relationship linking two or more characters.
#[derive(Debug, Clone, Deserialize)]
pub struct Bond {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BondKind,
    /// Member character ids.
    pub characters: Vec<String>,
    /// `Bonus` payload: character id -> level -> bonus text.
    #[serde(default)]
    pub bonuses: HashMap<String, BTreeMap<u8, String>>,
    /// `Lineup` payload: level -> effect text.
    #[serde(default)]
    pub effects: BTreeMap<u8, String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Bond {
    /// A bond is associated with a character iff the id is a member.
    pub fn includes(&self, character_id: &str) -> bool {
        self.characters.iter().any(|c| c == character_id)
    }

    /// Leveled bonus texts for one member (`Bonus` bonds only).
    pub fn bonus_for(&self, character_id: &str) -> Option<&BTreeMap<u8, String>> {
        self.bonuses.get(character_id)
    }
}
