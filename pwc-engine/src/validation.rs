//! Validation layer
//!
//! Pure checks run before a pathway is committed. Rules are evaluated in
//! order and stop at the first failure:
//! 1. a topic is selected (with [`validate_in`]: one of the category's topics)
//! 2. every selection field has at least one value (all empty fields are named)
//! 3. no other record in the category has the same topic
//!
//! Topics are compared with surrounding whitespace ignored.

use crate::category::{Category, SelectionField, TaxonomyField};
use crate::record::{PathwayContent, PathwayRecord};
use crate::taxonomy;
use std::fmt;

/// Outcome of [`validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Ok,
    MissingTopic,
    /// Empty selection fields, in form order
    IncompleteSelections(Vec<SelectionField>),
    DuplicateTopic,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }

    /// User-facing messages, one per problem
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationResult::Ok => Vec::new(),
            ValidationResult::MissingTopic => vec!["Please select a topic.".to_string()],
            ValidationResult::IncompleteSelections(fields) => fields
                .iter()
                .map(|field| format!("Please select at least one {} option.", field))
                .collect(),
            ValidationResult::DuplicateTopic => {
                vec!["A pathway with this topic already exists.".to_string()]
            }
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str("ok");
        }
        f.write_str(&self.messages().join("; "))
    }
}

/// Check `candidate` against the records already in its category
///
/// `existing` must not include the record being edited.
pub fn validate<'a, I>(candidate: &PathwayContent, existing: I) -> ValidationResult
where
    I: IntoIterator<Item = &'a PathwayRecord>,
{
    let topic = candidate.topic.trim();
    if topic.is_empty() {
        return ValidationResult::MissingTopic;
    }

    let missing: Vec<SelectionField> = SelectionField::ALL
        .into_iter()
        .filter(|field| candidate.selection(*field).is_empty())
        .collect();
    if !missing.is_empty() {
        return ValidationResult::IncompleteSelections(missing);
    }

    if existing
        .into_iter()
        .any(|record| record.content.topic.trim() == topic)
    {
        return ValidationResult::DuplicateTopic;
    }

    ValidationResult::Ok
}

/// [`validate`] plus taxonomy membership of the topic
///
/// A topic outside the category's topic list counts as no topic selected.
pub fn validate_in<'a, I>(category: Category, candidate: &PathwayContent, existing: I) -> ValidationResult
where
    I: IntoIterator<Item = &'a PathwayRecord>,
{
    let topic = candidate.topic.trim();
    if !topic.is_empty() && !taxonomy::is_valid(category, TaxonomyField::Topic, topic) {
        return ValidationResult::MissingTopic;
    }
    validate(candidate, existing)
}
