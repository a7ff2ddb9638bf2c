//! Pathway record store
//!
//! Single owner of the per-category collection and the dark-mode flag. All
//! mutation goes through this type; each mutator writes a full snapshot
//! before returning, then announces the change on the event bus.
//!
//! A failed validation leaves the collection untouched. A failed flush
//! keeps the in-memory change and returns [`Error::Storage`]; the next
//! successful flush writes everything again.

use crate::category::Category;
use crate::draft::PathwayDraft;
use crate::error::{Error, Result};
use crate::events::{EventBus, PathwayEvent};
use crate::persistence::SnapshotPersistence;
use crate::record::{Collection, PathwayPatch, PathwayRecord};
use crate::resolver;
use crate::validation::{validate_in, ValidationResult};
use pwc_common::config::RootFolderInitializer;
use pwc_common::{uuid_utils, KeyValueStore, SqliteKvStore};
use std::path::Path;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

pub struct PathwayStore<S> {
    collection: Collection,
    dark_mode: bool,
    persistence: SnapshotPersistence<S>,
    events: EventBus,
}

impl<S: KeyValueStore> PathwayStore<S> {
    /// Load the last snapshot from `storage` (empty if none or unreadable)
    pub async fn open(storage: S) -> Self {
        Self::open_with_events(storage, EventBus::default()).await
    }

    /// Like [`open`](Self::open), announcing changes on an existing bus
    pub async fn open_with_events(storage: S, events: EventBus) -> Self {
        let persistence = SnapshotPersistence::new(storage);
        let snapshot = persistence.load().await;

        info!("Pathway store opened with {} pathways", snapshot.collection.len());

        Self {
            collection: snapshot.collection,
            dark_mode: snapshot.dark_mode,
            persistence,
            events,
        }
    }

    /// Validate and append a new pathway
    ///
    /// The topic is trimmed and must be one of the category's topics. The
    /// exercise text is resolved from the draft's topic and proficiency
    /// unless the draft's exercise was edited by hand.
    ///
    /// On [`Error::Storage`] the record has still been appended (and will be
    /// written by the next successful flush); find it through
    /// [`records`](Self::records). Retrying the same draft then fails with
    /// `DuplicateTopic`.
    pub async fn create(&mut self, category: Category, draft: &PathwayDraft) -> Result<PathwayRecord> {
        let mut content = draft.content().clone();
        content.topic = content.topic.trim().to_string();
        content.canonicalize(category);

        check(validate_in(category, &content, self.collection.records(category)))?;

        if !draft.exercise_edited() {
            content.exercise = resolver::resolve(category, &content.topic, content.proficiency.values());
        }

        let record = PathwayRecord {
            id: uuid_utils::generate_id(),
            content,
        };
        self.collection.records_mut(category).push(record.clone());
        debug!("Created pathway {} ({}/{})", record.id, category, record.content.topic);

        self.flush().await?;
        self.events
            .emit_lossy(PathwayEvent::created(category, &record.id, &record.content.topic));
        Ok(record)
    }

    /// Apply `patch` to an existing pathway, keeping its position
    ///
    /// Duplicate detection runs against every other record of the category.
    /// As with [`create`](Self::create), a storage error leaves the change
    /// applied in memory.
    pub async fn update(&mut self, category: Category, id: &str, patch: &PathwayPatch) -> Result<PathwayRecord> {
        let index = self.position(category, id)?;
        let records = self.collection.records(category);

        let mut content = records[index].content.clone();
        let recompute = patch.apply_to(category, &mut content);
        if recompute {
            content.exercise = resolver::resolve(category, &content.topic, content.proficiency.values());
        }

        let others = records
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, record)| record);
        check(validate_in(category, &content, others))?;

        let record = PathwayRecord {
            id: id.to_string(),
            content,
        };
        self.collection.records_mut(category)[index] = record.clone();
        debug!("Updated pathway {} in {} (exercise recomputed: {})", id, category, recompute);

        self.flush().await?;
        self.events
            .emit_lossy(PathwayEvent::updated(category, id, recompute));
        Ok(record)
    }

    /// Append a copy of a pathway under a fresh id
    ///
    /// The copy shares the source's topic; uniqueness is only enforced on
    /// create and update.
    pub async fn duplicate(&mut self, category: Category, id: &str) -> Result<PathwayRecord> {
        let index = self.position(category, id)?;

        let record = PathwayRecord {
            id: uuid_utils::generate_id(),
            content: self.collection.records(category)[index].content.clone(),
        };
        self.collection.records_mut(category).push(record.clone());
        debug!("Duplicated pathway {} as {} in {}", id, record.id, category);

        self.flush().await?;
        self.events
            .emit_lossy(PathwayEvent::duplicated(category, id, &record.id));
        Ok(record)
    }

    /// Remove a pathway; an unknown id is a no-op returning `None`
    pub async fn delete(&mut self, category: Category, id: &str) -> Result<Option<PathwayRecord>> {
        let Ok(index) = self.position(category, id) else {
            debug!("Delete of unknown pathway {} in {} ignored", id, category);
            return Ok(None);
        };

        let removed = self.collection.records_mut(category).remove(index);
        debug!("Deleted pathway {} from {}", id, category);

        self.flush().await?;
        self.events.emit_lossy(PathwayEvent::deleted(category, id));
        Ok(Some(removed))
    }

    /// Move the record at `source` to `destination`, shifting the ones between
    pub async fn reorder(&mut self, category: Category, source: usize, destination: usize) -> Result<()> {
        let len = self.collection.records(category).len();
        for index in [source, destination] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
        if source == destination {
            return Ok(());
        }

        let records = self.collection.records_mut(category);
        let record = records.remove(source);
        records.insert(destination, record);
        debug!("Moved {} pathway from {} to {}", category, source, destination);

        self.flush().await?;
        self.events
            .emit_lossy(PathwayEvent::reordered(category, source, destination));
        Ok(())
    }

    pub async fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        if self.dark_mode == enabled {
            return Ok(());
        }
        self.dark_mode = enabled;

        self.flush().await?;
        self.events.emit_lossy(PathwayEvent::dark_mode_changed(enabled));
        Ok(())
    }

    /// Flip dark mode, returning the new value
    pub async fn toggle_dark_mode(&mut self) -> Result<bool> {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled).await?;
        Ok(enabled)
    }

    pub fn records(&self, category: Category) -> &[PathwayRecord] {
        self.collection.records(category)
    }

    pub fn get(&self, category: Category, id: &str) -> Option<&PathwayRecord> {
        self.records(category).iter().find(|record| record.id == id)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PathwayEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    fn position(&self, category: Category, id: &str) -> Result<usize> {
        self.records(category)
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| Error::NotFound {
                category,
                id: id.to_string(),
            })
    }

    async fn flush(&self) -> Result<()> {
        if let Err(e) = self.persistence.save(&self.collection, self.dark_mode).await {
            error!("Failed to persist pathway snapshot: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}

impl PathwayStore<SqliteKvStore> {
    /// Open the SQLite-backed store in `<root_folder>/pathways.db`
    ///
    /// Creates the folder and the database on first use.
    pub async fn open_in(root_folder: &Path) -> Result<Self> {
        let initializer = RootFolderInitializer::new(root_folder.to_path_buf());
        initializer.ensure_directory_exists()?;
        let storage = SqliteKvStore::open(&initializer.database_path()).await?;
        Ok(Self::open(storage).await)
    }
}

fn check(result: ValidationResult) -> Result<()> {
    if result.is_ok() {
        Ok(())
    } else {
        Err(Error::Validation(result))
    }
}
