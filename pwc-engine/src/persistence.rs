//! Snapshot persistence adapter
//!
//! The whole collection and the dark-mode flag are written as one snapshot
//! after every mutation, never as a diff. Loading is the one place where
//! malformed external data is expected: anything unreadable falls back to
//! empty state with a warning instead of failing the caller.

use crate::record::Collection;
use pwc_common::KeyValueStore;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Storage key of the serialized collection
pub const PATHWAYS_KEY: &str = "pathways";

/// Storage key of the dark-mode flag
pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Full persisted state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub collection: Collection,
    pub dark_mode: bool,
}

/// Reads and writes [`Snapshot`]s through a key-value store
pub struct SnapshotPersistence<S> {
    storage: S,
}

impl<S: KeyValueStore> SnapshotPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Write both keys in one atomic batch
    pub async fn save(&self, collection: &Collection, dark_mode: bool) -> pwc_common::Result<()> {
        let pathways = serde_json::to_string(collection)?;
        let dark_mode = serde_json::to_string(&dark_mode)?;

        self.storage
            .put_all(&[(PATHWAYS_KEY, pathways), (DARK_MODE_KEY, dark_mode)])
            .await?;

        debug!("Saved snapshot ({} pathways)", collection.len());
        Ok(())
    }

    /// Read the last snapshot; never fails
    ///
    /// Missing or malformed values load as an empty collection and dark
    /// mode off. Selections are re-canonicalized on the way in.
    pub async fn load(&self) -> Snapshot {
        let mut collection: Collection = self.read_or_default(PATHWAYS_KEY).await;
        collection.canonicalize();
        let dark_mode: bool = self.read_or_default(DARK_MODE_KEY).await;

        info!(
            "Loaded {} pathways (dark mode {})",
            collection.len(),
            if dark_mode { "on" } else { "off" }
        );

        Snapshot {
            collection,
            dark_mode,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored value for {}", key);
                return T::default();
            }
            Err(e) => {
                warn!("Failed to read {} from storage, using defaults: {}", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed {} snapshot, using defaults: {}", key, e);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{Category, SelectionField};
    use crate::record::{PathwayContent, PathwayRecord};
    use crate::selection::Selection;
    use pwc_common::MemoryKvStore;

    fn sample_collection() -> Collection {
        let mut collection = Collection::new();
        collection.records_mut(Category::Rhythm).push(PathwayRecord {
            id: "a".to_string(),
            content: PathwayContent {
                topic: "Beat".to_string(),
                proficiency: Selection::all(Category::Rhythm, SelectionField::Proficiency),
                ensemble: Selection::canonical(Category::Rhythm, SelectionField::Ensemble, ["Duet"]),
                activity: Selection::canonical(Category::Rhythm, SelectionField::Activity, ["Move", "Play"]),
                instruction: Selection::all(Category::Rhythm, SelectionField::Instruction),
                exercise: "Clap it.".to_string(),
                faculty_notes: String::new(),
            },
        });
        collection
    }

    #[tokio::test]
    async fn test_load_empty_storage() {
        let persistence = SnapshotPersistence::new(MemoryKvStore::new());
        assert_eq!(persistence.load().await, Snapshot::default());
    }

    #[tokio::test]
    async fn test_save_writes_both_keys() {
        let kv = MemoryKvStore::new();
        let persistence = SnapshotPersistence::new(kv.clone());
        persistence.save(&sample_collection(), true).await.unwrap();

        assert_eq!(kv.get(DARK_MODE_KEY).await.unwrap().as_deref(), Some("true"));
        let raw = kv.get(PATHWAYS_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["rhythm"][0]["activity"], "Move, Play");
        assert_eq!(value["melody"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_round_trip() {
        let persistence = SnapshotPersistence::new(MemoryKvStore::new());
        let collection = sample_collection();
        persistence.save(&collection, true).await.unwrap();

        let snapshot = persistence.load().await;
        assert_eq!(snapshot.collection, collection);
        assert!(snapshot.dark_mode);
    }

    #[tokio::test]
    async fn test_malformed_pathways_falls_back_to_empty() {
        let kv = MemoryKvStore::new();
        kv.put(PATHWAYS_KEY, "{not json".to_string()).await.unwrap();
        kv.put(DARK_MODE_KEY, "true".to_string()).await.unwrap();

        let snapshot = SnapshotPersistence::new(kv).load().await;
        assert!(snapshot.collection.is_empty());
        assert!(snapshot.dark_mode);
    }

    #[tokio::test]
    async fn test_malformed_dark_mode_is_off() {
        let kv = MemoryKvStore::new();
        kv.put(DARK_MODE_KEY, "\"yes\"".to_string()).await.unwrap();
        assert!(!SnapshotPersistence::new(kv).load().await.dark_mode);
    }

    #[tokio::test]
    async fn test_load_canonicalizes_selections() {
        let kv = MemoryKvStore::new();
        let raw = r#"{"harmony":[{"id":"1718034567890","topic":"Enharmony",
            "proficiency":"Advanced, Beginner, Advanced","ensemble":"Quartet, Solo",
            "activity":"Sing, Humming","instruction":"Instructor-Led","exercise":"x"}]}"#;
        kv.put(PATHWAYS_KEY, raw.to_string()).await.unwrap();

        let snapshot = SnapshotPersistence::new(kv).load().await;
        let record = &snapshot.collection.records(Category::Harmony)[0];
        assert_eq!(record.id, "1718034567890");
        assert_eq!(record.content.proficiency.to_joined(), "Beginner, Advanced");
        assert_eq!(record.content.ensemble.to_joined(), "Solo, Quartet");
        assert_eq!(record.content.activity.to_joined(), "Sing");
        assert_eq!(record.content.faculty_notes, "");
        assert!(snapshot.collection.records(Category::Rhythm).is_empty());
    }
}
