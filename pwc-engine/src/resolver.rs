//! Content resolver
//!
//! Turns a (category, topic, selected proficiency levels) triple into the
//! exercise text shown on a pathway:
//! - no topic: the catalog placeholder, unchanged
//! - every level selected: the full catalog text
//! - otherwise: only descriptions whose tag is a selected level
//!
//! Descriptions keep catalog order and are separated by a blank line. An
//! empty result is valid (e.g. all levels unchecked mid-edit).

use crate::catalog::{self, CatalogLookup};
use crate::category::{Category, SelectionField};
use crate::taxonomy;

/// Separator between resolved descriptions
pub const DESCRIPTION_SEPARATOR: &str = "\n\n";

/// Resolve the exercise text for a topic and a set of proficiency levels
///
/// Tags are matched exactly and case-sensitively against the text before
/// the first `/` of each description.
pub fn resolve<S: AsRef<str>>(category: Category, topic: &str, selected: &[S]) -> String {
    let descriptions = match catalog::exercise_descriptions(category, topic) {
        CatalogLookup::Placeholder(text) => return text.to_string(),
        CatalogLookup::Descriptions(descriptions) => descriptions,
    };

    if is_full_set(category, selected) {
        return descriptions.join(DESCRIPTION_SEPARATOR);
    }

    descriptions
        .iter()
        .filter(|description| {
            let tag = catalog::proficiency_tag(description);
            selected.iter().any(|level| level.as_ref() == tag)
        })
        .copied()
        .collect::<Vec<_>>()
        .join(DESCRIPTION_SEPARATOR)
}

/// Unfiltered exercise text for a topic
pub fn resolve_all(category: Category, topic: &str) -> String {
    resolve(
        category,
        topic,
        taxonomy::options_for(category, SelectionField::Proficiency),
    )
}

/// Same cardinality as the proficiency taxonomy and containing every level
fn is_full_set<S: AsRef<str>>(category: Category, selected: &[S]) -> bool {
    let levels = taxonomy::options_for(category, SelectionField::Proficiency);
    selected.len() == levels.len()
        && levels
            .iter()
            .all(|level| selected.iter().any(|s| s.as_ref() == *level))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    fn lines(text: &str) -> Vec<&str> {
        if text.is_empty() {
            Vec::new()
        } else {
            text.split(DESCRIPTION_SEPARATOR).collect()
        }
    }

    #[test]
    fn test_no_topic_returns_placeholder() {
        assert_eq!(resolve(Category::Melody, "", &["Beginner"]), "Select a topic first.");
        assert_eq!(resolve(Category::Melody, "", NONE), "Select a topic first.");
    }

    #[test]
    fn test_unknown_topic_resolves_empty() {
        assert_eq!(resolve_all(Category::Rhythm, "Enharmony"), "");
    }

    #[test]
    fn test_meter_beginner_and_advanced() {
        let text = resolve(Category::Rhythm, "Meter", &["Beginner", "Advanced"]);
        let result = lines(&text);

        assert_eq!(result.len(), 3);
        assert!(result[0].starts_with("Beginner/Solo"));
        assert!(result[1].starts_with("Advanced/Trio"));
        assert!(result[2].starts_with("Advanced/Quartet"));
        assert!(!text.contains("Intermediate/"));
    }

    #[test]
    fn test_full_set_returns_whole_catalog_in_order() {
        let CatalogLookup::Descriptions(all) = catalog::exercise_descriptions(Category::Harmony, "Enharmony") else {
            panic!("expected descriptions");
        };
        let expected = all.join("\n\n");

        assert_eq!(resolve_all(Category::Harmony, "Enharmony"), expected);
        // Selection order does not matter for the full set
        assert_eq!(
            resolve(Category::Harmony, "Enharmony", &["Advanced", "Beginner", "Intermediate"]),
            expected
        );
    }

    #[test]
    fn test_subset_law_for_every_topic() {
        let subsets: &[&[&str]] = &[
            &["Beginner"],
            &["Intermediate"],
            &["Advanced"],
            &["Beginner", "Intermediate"],
            &["Beginner", "Advanced"],
            &["Intermediate", "Advanced"],
        ];

        for category in Category::ALL {
            for topic in taxonomy::topics(category) {
                let CatalogLookup::Descriptions(all) = catalog::exercise_descriptions(category, topic) else {
                    panic!("expected descriptions");
                };
                for subset in subsets {
                    let text = resolve(category, topic, *subset);
                    let result = lines(&text);
                    for line in &result {
                        assert!(subset.contains(&catalog::proficiency_tag(line)));
                    }
                    let expected: Vec<&str> = all
                        .iter()
                        .copied()
                        .filter(|d| subset.contains(&catalog::proficiency_tag(d)))
                        .collect();
                    assert_eq!(result, expected, "{category}/{topic} {subset:?}");
                }
            }
        }
    }

    #[test]
    fn test_no_levels_selected_is_empty() {
        assert_eq!(resolve(Category::Rhythm, "Beat", NONE), "");
    }

    #[test]
    fn test_tag_match_is_case_sensitive() {
        assert_eq!(resolve(Category::Rhythm, "Beat", &["beginner"]), "");
        assert_eq!(resolve(Category::Rhythm, "Beat", &["Begin"]), "");
    }

    #[test]
    fn test_duplicate_levels_are_not_the_full_set() {
        // Three entries but Intermediate missing: filtered, not full
        let text = resolve(Category::Rhythm, "Meter", &["Beginner", "Beginner", "Advanced"]);
        assert_eq!(lines(&text).len(), 3);
        assert!(!text.contains("Intermediate/"));
    }
}
