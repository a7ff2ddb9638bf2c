//! Categories and the fields a pathway is described by

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level grouping partitioning the taxonomy and the record collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rhythm,
    Melody,
    Harmony,
}

impl Category {
    /// All categories in tab order
    pub const ALL: [Category; 3] = [Category::Rhythm, Category::Melody, Category::Harmony];

    /// Storage key used in the persisted snapshot
    pub fn key(self) -> &'static str {
        match self {
            Category::Rhythm => "rhythm",
            Category::Melody => "melody",
            Category::Harmony => "harmony",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Category::Rhythm => "Rhythm",
            Category::Melody => "Melody",
            Category::Harmony => "Harmony",
        }
    }

    /// Parse a storage key or label, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(name))
    }

    /// Message shown when the category has no pathways
    pub fn empty_state_message(self) -> String {
        format!(
            "No {} pathways yet. Click \"Add a Path\" to get started!",
            self.key()
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// Multi-select fields of a pathway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionField {
    Proficiency,
    Ensemble,
    Activity,
    Instruction,
}

impl SelectionField {
    /// Form order
    pub const ALL: [SelectionField; 4] = [
        SelectionField::Proficiency,
        SelectionField::Ensemble,
        SelectionField::Activity,
        SelectionField::Instruction,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SelectionField::Proficiency => "proficiency",
            SelectionField::Ensemble => "ensemble",
            SelectionField::Activity => "activity",
            SelectionField::Instruction => "instruction",
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any field with a taxonomy: the single-select topic or a selection field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyField {
    Topic,
    Selection(SelectionField),
}

impl From<SelectionField> for TaxonomyField {
    fn from(field: SelectionField) -> Self {
        TaxonomyField::Selection(field)
    }
}
