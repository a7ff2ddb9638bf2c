//! Editable pathway form state
//!
//! A [`PathwayDraft`] is what the add/edit form holds before commit. The
//! exercise text is derived from (topic, proficiency) until the user edits
//! it by hand; from then on it is left alone until [`PathwayDraft::reset_exercise`].
//!
//! Switching topics stashes the current field values under the old topic so
//! switching back restores them.

use crate::category::{Category, SelectionField};
use crate::record::{PathwayContent, PathwayPatch, PathwayRecord};
use crate::resolver;
use crate::selection::Selection;
use std::collections::HashMap;
use tracing::debug;

/// Field values saved for a topic the user switched away from
#[derive(Debug, Clone, PartialEq, Eq)]
struct Stashed {
    content: PathwayContent,
    exercise_edited: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathwayDraft {
    content: PathwayContent,
    exercise_edited: bool,
    stash: HashMap<String, Stashed>,
}

impl PathwayDraft {
    /// Empty draft: no topic, nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft with `topic` selected and every option of every field checked
    pub fn for_topic(category: Category, topic: &str) -> Self {
        let mut draft = Self::new();
        draft.select_topic(category, topic);
        draft
    }

    /// Draft for editing an existing record
    ///
    /// The exercise counts as manually edited when it differs from what the
    /// resolver would produce for the record's topic and proficiency.
    pub fn from_record(category: Category, record: &PathwayRecord) -> Self {
        let mut content = record.content.clone();
        content.canonicalize(category);
        let derived = resolver::resolve(category, &content.topic, content.proficiency.values());
        let exercise_edited = derived != content.exercise;

        Self {
            content,
            exercise_edited,
            stash: HashMap::new(),
        }
    }

    /// Switch the selected topic
    ///
    /// Current values are stashed under the previous topic. A topic seen
    /// before gets its stashed values back; a new topic starts with every
    /// option checked and the full catalog text.
    pub fn select_topic(&mut self, category: Category, topic: &str) {
        if topic == self.content.topic {
            return;
        }

        if !self.content.topic.is_empty() {
            self.stash.insert(
                self.content.topic.clone(),
                Stashed {
                    content: self.content.clone(),
                    exercise_edited: self.exercise_edited,
                },
            );
        }

        if let Some(saved) = self.stash.get(topic) {
            debug!("Restoring stashed values for topic {:?}", topic);
            self.content = saved.content.clone();
            self.exercise_edited = saved.exercise_edited;
            return;
        }

        self.content = PathwayContent {
            topic: topic.to_string(),
            proficiency: Selection::all(category, SelectionField::Proficiency),
            ensemble: Selection::all(category, SelectionField::Ensemble),
            activity: Selection::all(category, SelectionField::Activity),
            instruction: Selection::all(category, SelectionField::Instruction),
            exercise: resolver::resolve_all(category, topic),
            faculty_notes: String::new(),
        };
        self.exercise_edited = false;
    }

    /// Check or uncheck one option of a selection field
    pub fn toggle(&mut self, category: Category, field: SelectionField, value: &str, checked: bool) {
        let toggled = self
            .content
            .selection(field)
            .toggled(category, field, value, checked);
        self.set_selection(category, field, toggled);
    }

    /// Replace a whole selection field
    pub fn set_selection(&mut self, category: Category, field: SelectionField, selection: Selection) {
        let selection = selection.canonicalized(category, field);
        let changed = *self.content.selection(field) != selection;
        *self.content.selection_mut(field) = selection;

        if changed && field == SelectionField::Proficiency && !self.exercise_edited {
            self.content.exercise = self.derived_exercise(category);
        }
    }

    /// Replace the exercise text by hand
    pub fn edit_exercise(&mut self, text: impl Into<String>) {
        self.content.exercise = text.into();
        self.exercise_edited = true;
    }

    /// Drop a manual edit and go back to the resolved text
    pub fn reset_exercise(&mut self, category: Category) {
        self.exercise_edited = false;
        self.content.exercise = self.derived_exercise(category);
    }

    pub fn set_faculty_notes(&mut self, notes: impl Into<String>) {
        self.content.faculty_notes = notes.into();
    }

    pub fn topic(&self) -> &str {
        &self.content.topic
    }

    pub fn selection(&self, field: SelectionField) -> &Selection {
        self.content.selection(field)
    }

    pub fn exercise(&self) -> &str {
        &self.content.exercise
    }

    pub fn faculty_notes(&self) -> &str {
        &self.content.faculty_notes
    }

    pub fn exercise_edited(&self) -> bool {
        self.exercise_edited
    }

    /// Current field values
    pub fn content(&self) -> &PathwayContent {
        &self.content
    }

    /// Every field as a patch; the exercise is included only when edited by hand
    pub fn to_patch(&self) -> PathwayPatch {
        PathwayPatch {
            topic: Some(self.content.topic.clone()),
            proficiency: Some(self.content.proficiency.clone()),
            ensemble: Some(self.content.ensemble.clone()),
            activity: Some(self.content.activity.clone()),
            instruction: Some(self.content.instruction.clone()),
            exercise: self.exercise_edited.then(|| self.content.exercise.clone()),
            faculty_notes: Some(self.content.faculty_notes.clone()),
        }
    }

    fn derived_exercise(&self, category: Category) -> String {
        resolver::resolve(
            category,
            &self.content.topic,
            self.content.proficiency.values(),
        )
    }
}
