//! # Pathway Composer Engine
//!
//! Content resolution and persistence for teaching pathways:
//! - Static taxonomy of valid options per category and field
//! - Proficiency-tagged exercise catalog per (category, topic)
//! - Resolver filtering catalog text by selected proficiency levels
//! - Validation of candidate pathways (required fields, unique topic)
//! - Ordered per-category record store with full-snapshot persistence
//! - Edit drafts with per-topic stash and manual exercise override

pub mod catalog;
pub mod category;
pub mod draft;
pub mod error;
pub mod events;
pub mod persistence;
pub mod record;
pub mod resolver;
pub mod selection;
pub mod store;
pub mod taxonomy;
pub mod validation;

pub use category::{Category, SelectionField, TaxonomyField};
pub use draft::PathwayDraft;
pub use error::{Error, Result};
pub use events::{EventBus, PathwayEvent};
pub use persistence::{Snapshot, SnapshotPersistence};
pub use record::{Collection, PathwayContent, PathwayPatch, PathwayRecord};
pub use resolver::resolve;
pub use selection::Selection;
pub use store::PathwayStore;
pub use validation::{validate, validate_in, ValidationResult};
