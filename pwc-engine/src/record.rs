//! Pathway records and the per-category collection

use crate::category::{Category, SelectionField};
use crate::selection::Selection;
use serde::{Deserialize, Serialize};

/// Field values of a pathway, without its identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayContent {
    pub topic: String,
    pub proficiency: Selection,
    pub ensemble: Selection,
    pub activity: Selection,
    pub instruction: Selection,
    /// Resolved (or manually edited) exercise text
    pub exercise: String,
    /// Free-form notes; absent in snapshots written before notes existed
    #[serde(default)]
    pub faculty_notes: String,
}

impl PathwayContent {
    pub fn selection(&self, field: SelectionField) -> &Selection {
        match field {
            SelectionField::Proficiency => &self.proficiency,
            SelectionField::Ensemble => &self.ensemble,
            SelectionField::Activity => &self.activity,
            SelectionField::Instruction => &self.instruction,
        }
    }

    pub fn selection_mut(&mut self, field: SelectionField) -> &mut Selection {
        match field {
            SelectionField::Proficiency => &mut self.proficiency,
            SelectionField::Ensemble => &mut self.ensemble,
            SelectionField::Activity => &mut self.activity,
            SelectionField::Instruction => &mut self.instruction,
        }
    }

    /// Canonicalize every selection against the category's taxonomy
    pub fn canonicalize(&mut self, category: Category) {
        for field in SelectionField::ALL {
            let canonical = self.selection(field).canonicalized(category, field);
            *self.selection_mut(field) = canonical;
        }
    }
}

/// One stored pathway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayRecord {
    /// Opaque identifier; assigned once, never reused
    pub id: String,
    #[serde(flatten)]
    pub content: PathwayContent,
}

/// Partial update for [`crate::PathwayStore::update`]
///
/// `None` leaves a field unchanged. Supplying `exercise` marks the text as
/// manually edited: it is stored verbatim instead of being re-resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathwayPatch {
    pub topic: Option<String>,
    pub proficiency: Option<Selection>,
    pub ensemble: Option<Selection>,
    pub activity: Option<Selection>,
    pub instruction: Option<Selection>,
    pub exercise: Option<String>,
    pub faculty_notes: Option<String>,
}

impl PathwayPatch {
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn selection(mut self, field: SelectionField, selection: Selection) -> Self {
        let slot = match field {
            SelectionField::Proficiency => &mut self.proficiency,
            SelectionField::Ensemble => &mut self.ensemble,
            SelectionField::Activity => &mut self.activity,
            SelectionField::Instruction => &mut self.instruction,
        };
        *slot = Some(selection);
        self
    }

    pub fn exercise(mut self, exercise: impl Into<String>) -> Self {
        self.exercise = Some(exercise.into());
        self
    }

    pub fn faculty_notes(mut self, notes: impl Into<String>) -> Self {
        self.faculty_notes = Some(notes.into());
        self
    }

    /// Apply onto `content`, canonicalizing selections for `category`
    ///
    /// Returns true when the exercise text must be re-resolved: topic or
    /// proficiency changed and no manual exercise text was supplied.
    pub fn apply_to(&self, category: Category, content: &mut PathwayContent) -> bool {
        let mut derived_inputs_changed = false;

        if let Some(topic) = &self.topic {
            let topic = topic.trim();
            derived_inputs_changed |= topic != content.topic;
            content.topic = topic.to_string();
        }

        for field in SelectionField::ALL {
            let supplied = match field {
                SelectionField::Proficiency => &self.proficiency,
                SelectionField::Ensemble => &self.ensemble,
                SelectionField::Activity => &self.activity,
                SelectionField::Instruction => &self.instruction,
            };
            if let Some(selection) = supplied {
                let canonical = selection.canonicalized(category, field);
                if field == SelectionField::Proficiency {
                    derived_inputs_changed |= canonical != content.proficiency;
                }
                *content.selection_mut(field) = canonical;
            }
        }

        if let Some(notes) = &self.faculty_notes {
            content.faculty_notes = notes.clone();
        }

        match &self.exercise {
            Some(exercise) => {
                content.exercise = exercise.clone();
                false
            }
            None => derived_inputs_changed,
        }
    }
}

/// Ordered pathways of every category
///
/// Serializes as `{"rhythm": [...], "melody": [...], "harmony": [...]}`;
/// a missing category key deserializes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    rhythm: Vec<PathwayRecord>,
    #[serde(default)]
    melody: Vec<PathwayRecord>,
    #[serde(default)]
    harmony: Vec<PathwayRecord>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, category: Category) -> &[PathwayRecord] {
        match category {
            Category::Rhythm => &self.rhythm,
            Category::Melody => &self.melody,
            Category::Harmony => &self.harmony,
        }
    }

    pub(crate) fn records_mut(&mut self, category: Category) -> &mut Vec<PathwayRecord> {
        match category {
            Category::Rhythm => &mut self.rhythm,
            Category::Melody => &mut self.melody,
            Category::Harmony => &mut self.harmony,
        }
    }

    /// Total record count across categories
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.records(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Canonicalize every record's selections for its category
    pub(crate) fn canonicalize(&mut self) {
        for category in Category::ALL {
            for record in self.records_mut(category) {
                record.content.canonicalize(category);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(topic: &str, levels: &[&str]) -> PathwayContent {
        PathwayContent {
            topic: topic.to_string(),
            proficiency: Selection::canonical(Category::Rhythm, SelectionField::Proficiency, levels),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_json_field_names() {
        let record = PathwayRecord {
            id: "1".to_string(),
            content: PathwayContent {
                faculty_notes: "bring drums".to_string(),
                ..content("Beat", &["Beginner", "Advanced"])
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["topic"], "Beat");
        assert_eq!(value["proficiency"], "Beginner, Advanced");
        assert_eq!(value["ensemble"], "");
        assert_eq!(value["facultyNotes"], "bring drums");
    }

    #[test]
    fn test_record_without_faculty_notes_deserializes() {
        let json = r#"{"id":"1718034567890","topic":"Beat","proficiency":"Beginner",
            "ensemble":"Solo","activity":"Play","instruction":"Student-Led","exercise":"x"}"#;
        let record: PathwayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1718034567890");
        assert_eq!(record.content.faculty_notes, "");
    }

    #[test]
    fn test_patch_topic_change_requests_resolve() {
        let mut c = content("Beat", &["Beginner"]);
        let patch = PathwayPatch::default().topic("Meter");
        assert!(patch.apply_to(Category::Rhythm, &mut c));
        assert_eq!(c.topic, "Meter");
    }

    #[test]
    fn test_patch_same_values_do_not_request_resolve() {
        let mut c = content("Beat", &["Beginner"]);
        let patch = PathwayPatch::default()
            .topic("Beat")
            .selection(
                SelectionField::Proficiency,
                Selection::canonical(Category::Rhythm, SelectionField::Proficiency, ["Beginner"]),
            )
            .faculty_notes("n");
        assert!(!patch.apply_to(Category::Rhythm, &mut c));
        assert_eq!(c.faculty_notes, "n");
    }

    #[test]
    fn test_patch_topic_is_trimmed() {
        let mut c = content("Beat", &["Beginner"]);
        let patch = PathwayPatch::default().topic(" Beat  ");
        assert!(!patch.apply_to(Category::Rhythm, &mut c));
        assert_eq!(c.topic, "Beat");
    }

    #[test]
    fn test_patch_manual_exercise_wins() {
        let mut c = content("Beat", &["Beginner"]);
        let patch = PathwayPatch::default().topic("Meter").exercise("my own words");
        assert!(!patch.apply_to(Category::Rhythm, &mut c));
        assert_eq!(c.exercise, "my own words");
    }

    #[test]
    fn test_collection_missing_category_key_is_empty() {
        let collection: Collection = serde_json::from_str(r#"{"rhythm": []}"#).unwrap();
        assert!(collection.records(Category::Harmony).is_empty());
        assert!(collection.is_empty());
    }
}
