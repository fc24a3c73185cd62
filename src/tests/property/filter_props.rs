//! Property-based tests for the roster filter engine.
//!
//! Tests invariants:
//! - Results are always a subset of the input, in input order
//! - Every result satisfies every active criterion
//! - An unconstrained filter is the identity
//! - Queries differing only in case or diacritics match identically

use proptest::prelude::*;

use crate::core::filter::RosterFilter;
use crate::core::model::Character;
use crate::core::text::normalize;

// ============================================================================
// Strategies for generating rosters and queries
// ============================================================================

const SCHOOLS: [&str; 4] = ["karasuno", "nekoma", "aobajohsai", "shiratorizawa"];
const POSITIONS: [&str; 4] = ["colocador", "punta", "libero", "opuesto"];
const RARITIES: [&str; 3] = ["n", "sr", "ur"];

fn arb_name() -> impl Strategy<Value = String> {
    // Latin letters plus the accented vowels common in the data set.
    "[a-zA-ZáéíóúÁÉÍÓÚñÑ]{1,12}( [a-zA-ZáéíóúÁÉÍÓÚñÑ]{1,12})?"
}

fn arb_character() -> impl Strategy<Value = Character> {
    (
        "[a-z]{3,10}-(n|sr|ur)",
        arb_name(),
        prop::sample::select(&SCHOOLS[..]),
        prop::sample::select(&POSITIONS[..]),
        prop::sample::select(&RARITIES[..]),
    )
        .prop_map(|(id, name, school, position, rarity)| {
            serde_json::from_value(serde_json::json!({
                "id": id,
                "name": name,
                "rarity": rarity,
                "id_school": school,
                "position": position,
                "stats": {
                    "colocacion": 0, "saque": 0, "recuperacion": 0, "bloqueo": 0,
                    "recepcion": 0, "ataque_rapido": 0, "ataque_poderoso": 0
                }
            }))
            .expect("generated character JSON is well-formed")
        })
}

fn arb_roster() -> impl Strategy<Value = Vec<Character>> {
    prop::collection::vec(arb_character(), 0..16)
}

fn arb_filter() -> impl Strategy<Value = RosterFilter> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Záéíóú]{0,6}"],
        prop_oneof![Just(""), prop::sample::select(&SCHOOLS[..])],
        prop_oneof![Just(""), prop::sample::select(&POSITIONS[..])],
        prop_oneof![Just(""), prop::sample::select(&RARITIES[..])],
    )
        .prop_map(|(query, school, position, rarity)| RosterFilter {
            query,
            school: school.to_string(),
            position: position.to_string(),
            rarity: rarity.to_string(),
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// An unconstrained filter returns every character, unchanged order.
    #[test]
    fn unconstrained_filter_is_identity(roster in arb_roster()) {
        let filter = RosterFilter::default();
        prop_assert!(filter.is_unconstrained());

        let results = filter.apply(&roster);
        prop_assert_eq!(results.len(), roster.len());
        for (result, original) in results.iter().zip(roster.iter()) {
            prop_assert_eq!(&result.id, &original.id);
        }
    }

    /// Every result satisfies every active criterion.
    #[test]
    fn results_satisfy_all_criteria(roster in arb_roster(), filter in arb_filter()) {
        let query = normalize(&filter.query);
        for ch in filter.apply(&roster) {
            prop_assert!(query.is_empty() || normalize(&ch.name).contains(&query));
            prop_assert!(filter.school.is_empty() || ch.school == filter.school);
            prop_assert!(filter.position.is_empty() || ch.position == filter.position);
            prop_assert!(filter.rarity.is_empty() || ch.rarity == filter.rarity);
        }
    }

    /// Results are a subsequence of the roster (order preserved, no dupes).
    #[test]
    fn results_preserve_roster_order(roster in arb_roster(), filter in arb_filter()) {
        let results = filter.apply(&roster);

        let mut cursor = 0;
        for result in results {
            let position = roster[cursor..]
                .iter()
                .position(|ch| std::ptr::eq(ch, result));
            prop_assert!(position.is_some());
            cursor += position.unwrap_or(0) + 1;
        }
    }

    /// Adding a constraint never grows the result set.
    #[test]
    fn constraints_only_narrow(roster in arb_roster(), filter in arb_filter()) {
        let unconstrained = RosterFilter::default().apply(&roster).len();
        prop_assert!(filter.apply(&roster).len() <= unconstrained);
    }

    /// Queries that normalize identically produce identical results.
    #[test]
    fn query_matching_ignores_case_and_accents(
        roster in arb_roster(),
        query in "[a-zA-Z]{1,8}",
    ) {
        let lower = RosterFilter { query: query.to_lowercase(), ..Default::default() };
        let upper = RosterFilter { query: query.to_uppercase(), ..Default::default() };

        let lower_ids: Vec<&str> =
            lower.apply(&roster).iter().map(|ch| ch.id.as_str()).collect();
        let upper_ids: Vec<&str> =
            upper.apply(&roster).iter().map(|ch| ch.id.as_str()).collect();
        prop_assert_eq!(lower_ids, upper_ids);
    }

    /// clear() always restores the unconstrained filter.
    #[test]
    fn clear_restores_identity(mut filter in arb_filter(), roster in arb_roster()) {
        filter.clear();
        prop_assert!(filter.is_unconstrained());
        prop_assert_eq!(filter.apply(&roster).len(), roster.len());
    }
}

proptest! {
    /// Normalization is idempotent and never reintroduces combining marks.
    #[test]
    fn normalize_is_idempotent(text in "\\PC{0,40}") {
        let once = normalize(&text);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }
}
