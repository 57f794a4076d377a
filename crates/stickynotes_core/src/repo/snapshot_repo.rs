//! Whole-board snapshot persistence over a key-value store.
//!
//! # Responsibility
//! - Write the ordered snapshot list as one blob under one key.
//! - Read it back leniently.
//!
//! # Invariants
//! - `load_all` never fails; unreadable or malformed data reads as empty.

use crate::model::snapshot::{decode_snapshots, encode_snapshots, NoteSnapshot};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::{debug, warn};

pub struct SnapshotRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrites the stored blob with `snapshots`, in order.
    pub fn save_all(&mut self, snapshots: &[NoteSnapshot]) -> RepoResult<()> {
        let blob = encode_snapshots(snapshots)?;
        self.store.set_item(&self.key, &blob)?;
        debug!(
            "event=snapshot_save module=repo status=ok key={} notes={} bytes={}",
            self.key,
            snapshots.len(),
            blob.len()
        );
        Ok(())
    }

    /// Reads the stored blob.
    pub fn load_all(&self) -> Vec<NoteSnapshot> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=snapshot_load module=repo status=empty key={}",
                    self.key
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=error key={} error_code=store_read_failed error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match decode_snapshots(&raw) {
            Ok(snapshots) => {
                debug!(
                    "event=snapshot_load module=repo status=ok key={} notes={}",
                    self.key,
                    snapshots.len()
                );
                snapshots
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=error key={} error_code=blob_malformed error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    /// Removes the stored blob.
    pub fn clear(&mut self) -> RepoResult<()> {
        self.store.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotRepository;
    use crate::model::snapshot::NoteSnapshot;
    use crate::repo::kv_repo::{KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult};

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get_item(&self, _key: &str) -> RepoResult<Option<String>> {
            Err(RepoError::Storage("denied".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> RepoResult<()> {
            Err(RepoError::Storage("quota exceeded".to_string()))
        }

        fn remove_item(&mut self, _key: &str) -> RepoResult<()> {
            Ok(())
        }
    }

    #[test]
    fn save_then_load_preserves_order() {
        let mut repo = SnapshotRepository::new(MemoryKeyValueStore::new(), "notes");
        let snapshots = vec![
            NoteSnapshot {
                id: "b".to_string(),
                ..NoteSnapshot::default()
            },
            NoteSnapshot {
                id: "a".to_string(),
                ..NoteSnapshot::default()
            },
        ];
        repo.save_all(&snapshots).unwrap();
        assert_eq!(repo.load_all(), snapshots);

        repo.clear().unwrap();
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn load_treats_malformed_blob_as_empty() {
        let store = MemoryKeyValueStore::new().with_item("notes", "{not json");
        let repo = SnapshotRepository::new(store, "notes");
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn load_treats_store_error_as_empty_and_save_surfaces_it() {
        let mut repo = SnapshotRepository::new(FailingStore, "notes");
        assert!(repo.load_all().is_empty());
        let err = repo.save_all(&[]).unwrap_err();
        assert!(matches!(err, RepoError::Storage(_)));
    }
}
