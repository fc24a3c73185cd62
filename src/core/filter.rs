//! Roster filter engine.
//!
//! A pure, stateless filter re-evaluated on every keystroke: free-text
//! search on the character name (case- and accent-insensitive) combined
//! with three categorical filters. Empty string means "no constraint".

use super::model::Character;
use super::text::normalize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    /// Free-text query matched against the character name.
    pub query: String,
    /// School id, or empty for any.
    pub school: String,
    /// Position id, or empty for any.
    pub position: String,
    /// Rarity id, or empty for any.
    pub rarity: String,
}

impl RosterFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty()
            && self.school.is_empty()
            && self.position.is_empty()
            && self.rarity.is_empty()
    }

    pub fn clear(&mut self) {
        *self = RosterFilter::default();
    }

    /// Characters matching every active criterion, relative order preserved.
    pub fn apply<'a>(&self, roster: &'a [Character]) -> Vec<&'a Character> {
        let query = normalize(&self.query);
        roster
            .iter()
            .filter(|ch| {
                let matches_query =
                    query.is_empty() || normalize(&ch.name).contains(&query);
                let matches_school = self.school.is_empty() || ch.school == self.school;
                let matches_position =
                    self.position.is_empty() || ch.position == self.position;
                let matches_rarity = self.rarity.is_empty() || ch.rarity == self.rarity;

                matches_query && matches_school && matches_position && matches_rarity
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: &str, name: &str, school: &str, position: &str, rarity: &str) -> Character {
        let json = serde_json::json!({
            "id": id,
            "name": name,
            "rarity": rarity,
            "id_school": school,
            "position": position,
            "stats": {
                "colocacion": 0, "saque": 0, "recuperacion": 0, "bloqueo": 0,
                "recepcion": 0, "ataque_rapido": 0, "ataque_poderoso": 0
            }
        });
        serde_json::from_value(json).unwrap()
    }

    fn roster() -> Vec<Character> {
        vec![
            character("oikawa-ur", "Oikawa Tooru", "aobajohsai", "colocador", "ur"),
            character("hoshiumi-ur", "Hoshiumi Kourai", "kamomedai", "punta", "ur"),
            character("kageyama-sr", "Kageyama Tobio", "karasuno", "colocador", "sr"),
            character("nishinoya-sr", "Nishinoya Yuu", "karasuno", "libero", "sr"),
            character("ushijima-ur", "Ushijima Wakatoshi", "shiratorizawa", "opuesto", "ur"),
        ]
    }

    fn ids(matches: &[&Character]) -> Vec<String> {
        matches.iter().map(|ch| ch.id.clone()).collect()
    }

    #[test]
    fn test_unconstrained_filter_is_identity() {
        let roster = roster();
        let filter = RosterFilter::default();
        assert!(filter.is_unconstrained());

        let matched = filter.apply(&roster);
        assert_eq!(matched.len(), roster.len());
        for (matched, original) in matched.iter().zip(roster.iter()) {
            assert_eq!(matched.id, original.id);
        }
    }

    #[test]
    fn test_query_is_case_and_accent_insensitive() {
        let roster = roster();
        let upper = RosterFilter {
            query: "KAGEYAMA".into(),
            ..Default::default()
        };
        let accented = RosterFilter {
            query: "kagéyamá".into(),
            ..Default::default()
        };
        assert_eq!(ids(&upper.apply(&roster)), vec!["kageyama-sr"]);
        assert_eq!(ids(&upper.apply(&roster)), ids(&accented.apply(&roster)));
    }

    #[test]
    fn test_query_matches_substring() {
        let roster = roster();
        let filter = RosterFilter {
            query: "shi".into(),
            ..Default::default()
        };
        // Hoshiumi, Nishinoya, Ushijima all contain "shi".
        assert_eq!(
            ids(&filter.apply(&roster)),
            vec!["hoshiumi-ur", "nishinoya-sr", "ushijima-ur"]
        );
    }

    #[test]
    fn test_school_filter_preserves_relative_order() {
        let roster = roster();
        let filter = RosterFilter {
            school: "karasuno".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&roster)), vec!["kageyama-sr", "nishinoya-sr"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let roster = roster();
        let filter = RosterFilter {
            school: "karasuno".into(),
            position: "colocador".into(),
            rarity: "sr".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&roster)), vec!["kageyama-sr"]);

        let contradiction = RosterFilter {
            school: "karasuno".into(),
            rarity: "ur".into(),
            ..Default::default()
        };
        assert!(contradiction.apply(&roster).is_empty());
    }

    #[test]
    fn test_clear_resets_all_criteria() {
        let mut filter = RosterFilter {
            query: "oikawa".into(),
            school: "aobajohsai".into(),
            position: "colocador".into(),
            rarity: "ur".into(),
        };
        filter.clear();
        assert!(filter.is_unconstrained());
    }
}
