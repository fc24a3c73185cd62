//! Reference catalogs: id-indexed lookup tables loaded once at startup.
//!
//! Catalogs keep the order of the source JSON sequences (filter menus cycle
//! in catalog order) while serving O(1) lookups by id. A catalog that fails
//! to load degrades to empty; entries referencing missing ids are simply
//! omitted from display.

use indexmap::IndexMap;

use super::loader::DataLoader;
use super::model::{Bond, CatalogEntry, Character};

/// One static lookup table (schools, positions, rarities or specialties).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.id.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    /// Display name for an id; `None` when the reference is dangling.
    pub fn name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|entry| entry.name.as_str())
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All reference catalogs, loaded in one concurrent batch.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    pub schools: Catalog,
    pub positions: Catalog,
    pub rarities: Catalog,
    pub specialties: Catalog,
    pub bonds: Vec<Bond>,
}

impl CatalogSet {
    /// Fetch all five catalog files concurrently. A failed file leaves its
    /// catalog empty instead of failing the batch.
    pub async fn load(loader: &DataLoader) -> Self {
        let (mut tables, bonds) = tokio::join!(
            loader.load_many::<Vec<CatalogEntry>, _, _>([
                "schools.json",
                "positions.json",
                "rarities.json",
                "specialties.json",
            ]),
            loader.load_one::<Vec<Bond>>("bonds.json"),
        );

        // load_many preserves input order; drain back-to-front.
        let specialties = tables.pop().flatten().unwrap_or_default();
        let rarities = tables.pop().flatten().unwrap_or_default();
        let positions = tables.pop().flatten().unwrap_or_default();
        let schools = tables.pop().flatten().unwrap_or_default();

        Self {
            schools: Catalog::new(schools),
            positions: Catalog::new(positions),
            rarities: Catalog::new(rarities),
            specialties: Catalog::new(specialties),
            bonds: bonds.unwrap_or_default(),
        }
    }

    /// Bonds whose member list contains the character, in catalog order.
    pub fn bonds_for(&self, character_id: &str) -> Vec<&Bond> {
        self.bonds
            .iter()
            .filter(|bond| bond.includes(character_id))
            .collect()
    }

    /// Resolve specialty ids to display names, silently dropping unknowns.
    pub fn specialty_names(&self, ids: &[String]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.specialties.name(id))
            .collect()
    }
}

/// Everything the application loads at startup: catalogs plus the roster.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub catalogs: CatalogSet,
    pub roster: Vec<Character>,
}

impl WorldSnapshot {
    /// Load catalogs and character records in one fan-out batch.
    ///
    /// Character files that fail to load are dropped from the roster
    /// (the gallery shows the ones that did load).
    pub async fn load(loader: &DataLoader, roster_ids: &[String]) -> Self {
        let paths: Vec<String> = roster_ids
            .iter()
            .map(|id| DataLoader::character_path(id))
            .collect();

        let (catalogs, records) = tokio::join!(
            CatalogSet::load(loader),
            loader.load_many::<Character, _, _>(&paths),
        );

        let roster: Vec<Character> = records.into_iter().flatten().collect();
        log::info!(
            "loaded {} of {} characters, {} bonds",
            roster.len(),
            roster_ids.len(),
            catalogs.bonds.len()
        );

        Self { catalogs, roster }
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.roster.iter().find(|ch| ch.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::BondKind;

    fn entry(id: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
        }
    }

    #[test]
    fn test_catalog_lookup_by_id() {
        let catalog = Catalog::new(vec![entry("s1", "Itachiyama"), entry("s2", "Karasuno")]);
        assert_eq!(catalog.name("s1"), Some("Itachiyama"));
        assert_eq!(catalog.name("s3"), None);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_catalog_preserves_source_order() {
        let catalog = Catalog::new(vec![
            entry("z", "Zeta"),
            entry("a", "Alpha"),
            entry("m", "Mid"),
        ]);
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_specialty_names_omit_unknown_ids() {
        let mut set = CatalogSet::default();
        set.specialties = Catalog::new(vec![entry("defensa", "Defensa")]);
        let names = set.specialty_names(&["defensa".into(), "ghost".into()]);
        assert_eq!(names, vec!["Defensa"]);
    }

    #[test]
    fn test_bonds_for_filters_by_membership() {
        let mut set = CatalogSet::default();
        set.bonds = vec![
            Bond {
                id: "b1".into(),
                name: "Rivales".into(),
                kind: BondKind::Lineup,
                characters: vec!["oikawa-ur".into(), "hoshiumi-ur".into()],
                bonuses: Default::default(),
                effects: Default::default(),
                icon: None,
                image: None,
            },
            Bond {
                id: "b2".into(),
                name: "Cuervos".into(),
                kind: BondKind::Bonus,
                characters: vec!["kageyama-ur".into()],
                bonuses: Default::default(),
                effects: Default::default(),
                icon: None,
                image: None,
            },
        ];

        let bonds = set.bonds_for("oikawa-ur");
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].id, "b1");
        assert!(set.bonds_for("kageyama-ur").iter().all(|b| b.id == "b2"));
        assert!(set.bonds_for("nobody").is_empty());
    }

    #[tokio::test]
    async fn test_catalog_set_load_degrades_missing_files_to_empty() {
        use crate::core::loader::DataSource;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("schools.json"),
            r#"[{"id": "s1", "name": "Itachiyama"}]"#,
        )
        .unwrap();
        // positions.json, rarities.json, specialties.json, bonds.json absent.

        let loader = DataLoader::new(DataSource::Local {
            dir: dir.path().to_path_buf(),
        });
        let set = CatalogSet::load(&loader).await;

        assert_eq!(set.schools.name("s1"), Some("Itachiyama"));
        assert!(set.positions.is_empty());
        assert!(set.rarities.is_empty());
        assert!(set.specialties.is_empty());
        assert!(set.bonds.is_empty());
    }
}
