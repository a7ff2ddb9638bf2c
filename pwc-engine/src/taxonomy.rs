//! Taxonomy registry
//!
//! Static, ordered sets of valid values for every field of every category.
//! Option order here is the canonical order of stored selections.

use crate::category::{Category, SelectionField, TaxonomyField};

/// Valid values for each field of one category
#[derive(Debug)]
pub struct TaxonomyEntry {
    pub topic: &'static [&'static str],
    pub proficiency: &'static [&'static str],
    pub ensemble: &'static [&'static str],
    pub activity: &'static [&'static str],
    pub instruction: &'static [&'static str],
}

impl TaxonomyEntry {
    pub fn options(&self, field: TaxonomyField) -> &'static [&'static str] {
        match field {
            TaxonomyField::Topic => self.topic,
            TaxonomyField::Selection(SelectionField::Proficiency) => self.proficiency,
            TaxonomyField::Selection(SelectionField::Ensemble) => self.ensemble,
            TaxonomyField::Selection(SelectionField::Activity) => self.activity,
            TaxonomyField::Selection(SelectionField::Instruction) => self.instruction,
        }
    }
}

const PROFICIENCY_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

const ENSEMBLE_SIZES: &[&str] = &["Solo", "Duet", "Trio", "Quartet"];

const ACTIVITY_TYPES: &[&str] = &["Compose", "Improvise", "Move", "Notate", "Play", "Read", "Sing"];

const INSTRUCTION_MODES: &[&str] = &["Student-Led", "Instructor-Led"];

static RHYTHM: TaxonomyEntry = TaxonomyEntry {
    topic: &["Beat", "Meter", "Syncopation"],
    proficiency: PROFICIENCY_LEVELS,
    ensemble: ENSEMBLE_SIZES,
    activity: ACTIVITY_TYPES,
    instruction: INSTRUCTION_MODES,
};

static MELODY: TaxonomyEntry = TaxonomyEntry {
    topic: &["Scales", "Intervals", "Chromaticism"],
    proficiency: PROFICIENCY_LEVELS,
    ensemble: ENSEMBLE_SIZES,
    activity: ACTIVITY_TYPES,
    instruction: INSTRUCTION_MODES,
};

// "Disonance" is the stored topic key; do not correct it.
static HARMONY: TaxonomyEntry = TaxonomyEntry {
    topic: &["Consonance and Disonance", "Chord Positions", "Enharmony"],
    proficiency: PROFICIENCY_LEVELS,
    ensemble: ENSEMBLE_SIZES,
    activity: ACTIVITY_TYPES,
    instruction: INSTRUCTION_MODES,
};

/// Taxonomy of a category
pub fn entry(category: Category) -> &'static TaxonomyEntry {
    match category {
        Category::Rhythm => &RHYTHM,
        Category::Melody => &MELODY,
        Category::Harmony => &HARMONY,
    }
}

/// Ordered valid values of `field` in `category`
pub fn options_for(category: Category, field: impl Into<TaxonomyField>) -> &'static [&'static str] {
    entry(category).options(field.into())
}

/// Like [`options_for`], keyed by category name; unknown names yield no options
pub fn options_for_name(category: &str, field: impl Into<TaxonomyField>) -> &'static [&'static str] {
    match Category::from_name(category) {
        Some(category) => options_for(category, field),
        None => &[],
    }
}

/// Topics of a category
pub fn topics(category: Category) -> &'static [&'static str] {
    entry(category).topic
}

/// Whether `value` is an exact member of the field's taxonomy
pub fn is_valid(category: Category, field: impl Into<TaxonomyField>, value: &str) -> bool {
    options_for(category, field).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_per_category() {
        assert_eq!(topics(Category::Rhythm), &["Beat", "Meter", "Syncopation"]);
        assert_eq!(topics(Category::Melody), &["Scales", "Intervals", "Chromaticism"]);
        assert_eq!(
            topics(Category::Harmony),
            &["Consonance and Disonance", "Chord Positions", "Enharmony"]
        );
    }

    #[test]
    fn test_selection_options_shared_across_categories() {
        for category in Category::ALL {
            assert_eq!(options_for(category, SelectionField::Proficiency).len(), 3);
            assert_eq!(options_for(category, SelectionField::Ensemble).len(), 4);
            assert_eq!(options_for(category, SelectionField::Activity).len(), 7);
            assert_eq!(
                options_for(category, SelectionField::Instruction),
                &["Student-Led", "Instructor-Led"]
            );
        }
    }

    #[test]
    fn test_options_for_unknown_category_name_is_empty() {
        assert!(options_for_name("Texture", TaxonomyField::Topic).is_empty());
        assert!(options_for_name("", SelectionField::Activity).is_empty());
        assert_eq!(options_for_name("Rhythm", TaxonomyField::Topic).len(), 3);
    }

    #[test]
    fn test_is_valid_is_exact() {
        assert!(is_valid(Category::Rhythm, TaxonomyField::Topic, "Beat"));
        assert!(!is_valid(Category::Rhythm, TaxonomyField::Topic, "beat"));
        assert!(!is_valid(Category::Melody, TaxonomyField::Topic, "Beat"));
        assert!(is_valid(Category::Harmony, SelectionField::Ensemble, "Quartet"));
    }
}
