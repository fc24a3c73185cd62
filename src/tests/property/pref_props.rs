//! Property-based tests for the preference store and its key codec.
//!
//! Tests invariants:
//! - Storage keys round-trip through parse for all valid slug ids
//! - Stored levels and grades survive a reopen of the store
//! - Unknown keys always yield the documented defaults

use proptest::prelude::*;

use crate::core::model::Grade;
use crate::core::prefs::{PrefKey, PreferenceStore, DEFAULT_ABILITY_LEVEL};

/// Hyphen-delimited slugs, the id shape used by the data set. Underscore
/// is excluded because it is the storage-key separator.
fn arb_slug() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,2}"
}

fn arb_grade() -> impl Strategy<Value = Grade> {
    prop::sample::select(&Grade::ALL[..])
}

proptest! {
    /// Every typed key survives the trip through its flat storage form.
    #[test]
    fn storage_keys_roundtrip(character in arb_slug(), ability in arb_slug()) {
        let level_key = PrefKey::ability_level(&character, &ability);
        prop_assert_eq!(PrefKey::parse(&level_key.storage_key()), Some(level_key));

        let grade_key = PrefKey::memory_grade(&character);
        prop_assert_eq!(PrefKey::parse(&grade_key.storage_key()), Some(grade_key));
    }

    /// Keys for different (character, ability) pairs never collide.
    #[test]
    fn distinct_ids_produce_distinct_keys(
        a in arb_slug(), b in arb_slug(),
        x in arb_slug(), y in arb_slug(),
    ) {
        prop_assume!((a.clone(), b.clone()) != (x.clone(), y.clone()));
        prop_assert_ne!(
            PrefKey::ability_level(&a, &b).storage_key(),
            PrefKey::ability_level(&x, &y).storage_key()
        );
    }

    /// A stored level is returned verbatim, before and after a reopen.
    #[test]
    fn ability_levels_survive_reopen(
        character in arb_slug(),
        ability in arb_slug(),
        level in 1u8..=10,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut store = PreferenceStore::open(&path);
        store.set_ability_level(&character, &ability, level);
        prop_assert_eq!(store.ability_level(&character, &ability), level);

        let reloaded = PreferenceStore::open(&path);
        prop_assert_eq!(reloaded.ability_level(&character, &ability), level);
    }

    /// A stored grade is returned verbatim, before and after a reopen.
    #[test]
    fn memory_grades_survive_reopen(character in arb_slug(), grade in arb_grade()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut store = PreferenceStore::open(&path);
        store.set_memory_grade(&character, grade);
        prop_assert_eq!(store.memory_grade(&character), grade);

        let reloaded = PreferenceStore::open(&path);
        prop_assert_eq!(reloaded.memory_grade(&character), grade);
    }

    /// Characters never written to the store report the defaults.
    #[test]
    fn unset_keys_yield_defaults(character in arb_slug(), ability in arb_slug()) {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("preferences.json"));
        prop_assert_eq!(
            store.ability_level(&character, &ability),
            DEFAULT_ABILITY_LEVEL
        );
        prop_assert_eq!(store.memory_grade(&character), Grade::I);
    }

    /// Writes to one character never leak into another.
    #[test]
    fn writes_are_isolated_per_character(
        written in arb_slug(),
        other in arb_slug(),
        grade in arb_grade(),
    ) {
        prop_assume!(written != other);
        let dir = tempfile::tempdir().unwrap();
        let mut store = PreferenceStore::open(dir.path().join("preferences.json"));

        store.set_memory_grade(&written, grade);
        prop_assert_eq!(store.memory_grade(&other), Grade::I);
    }
}
