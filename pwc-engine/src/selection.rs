//! Canonical multi-select values
//!
//! A [`Selection`] is a duplicate-free list of taxonomy values kept in
//! taxonomy order, so two selections of the same options always compare
//! equal no matter the order they were clicked in. On the wire it is the
//! values joined by `", "`.

use crate::category::{Category, SelectionField};
use crate::taxonomy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Separator between values in the stored form
pub const SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection(Vec<String>);

impl Selection {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `values` against the field's taxonomy
    ///
    /// Keeps taxonomy members in taxonomy order, once each. Values outside
    /// the taxonomy are dropped.
    pub fn canonical<I, S>(category: Category, field: SelectionField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        let options = taxonomy::options_for(category, field);

        for value in &values {
            let value = value.as_ref();
            if !options.contains(&value) {
                warn!("Dropping unknown {} value {:?} for {}", field, value, category);
            }
        }

        Self(
            options
                .iter()
                .filter(|option| values.iter().any(|v| v.as_ref() == **option))
                .map(|option| option.to_string())
                .collect(),
        )
    }

    /// Every option of the field, in taxonomy order
    pub fn all(category: Category, field: SelectionField) -> Self {
        Self(
            taxonomy::options_for(category, field)
                .iter()
                .map(|option| option.to_string())
                .collect(),
        )
    }

    /// Parse the stored `", "`-joined form and canonicalize it
    pub fn parse(category: Category, field: SelectionField, joined: &str) -> Self {
        Self::canonical(category, field, split_joined(joined))
    }

    /// Re-canonicalize a selection that was built without taxonomy context
    pub fn canonicalized(&self, category: Category, field: SelectionField) -> Self {
        Self::canonical(category, field, &self.0)
    }

    /// Copy with `value` added (`checked`) or removed, canonicalized
    pub fn toggled(&self, category: Category, field: SelectionField, value: &str, checked: bool) -> Self {
        let remaining = self.0.iter().map(String::as_str).filter(|v| *v != value);
        if checked {
            Self::canonical(category, field, remaining.chain(std::iter::once(value)))
        } else {
            Self::canonical(category, field, remaining)
        }
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stored form: values joined by `", "`
    pub fn to_joined(&self) -> String {
        self.0.join(SEPARATOR)
    }
}

/// Split a joined list, trimming whitespace and dropping empty segments
fn split_joined(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(',').map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_joined())
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_joined())
    }
}

/// Deserialization has no category context: values are split and
/// de-duplicated in stored order. Callers canonicalize afterwards.
impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let joined = String::deserialize(deserializer)?;
        let mut values: Vec<String> = Vec::new();
        for value in split_joined(&joined) {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        Ok(Self(values))
    }
}
