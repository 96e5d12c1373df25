//! Generic flat-file JSON record store
//!
//! One pretty-printed JSON array file per collection. Every mutation is
//! a full read-modify-write cycle; callers hold the per-collection lock
//! from [`JsonStore::lock_for`] across the whole cycle.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::{error::AppResult, models::Entity};

pub struct JsonStore {
    dir: PathBuf,
    locks: std::sync::Mutex<HashMap<&'static str, Arc<Mutex<()>>>>,
}

impl JsonStore {
    /// Open (and create if needed) the storage directory
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            locks: std::sync::Mutex::new(HashMap::new()),
        })
    }

    fn path<T: Entity>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", T::COLLECTION))
    }

    /// Write lock for a collection. Hold the guard across every
    /// load-mutate-save cycle touching that collection; concurrent
    /// requests would otherwise lose updates to each other.
    pub fn lock_for<T: Entity>(&self) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        locks
            .entry(T::COLLECTION)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Load all records of a collection. A missing or unparsable file
    /// degrades to an empty collection; corruption is logged but never
    /// fails the request.
    pub async fn load<T>(&self) -> Vec<T>
    where
        T: Entity + DeserializeOwned,
    {
        let path = self.path::<T>();
        match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(
                        "Collection file {} is unparsable, treating as empty: {}",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the collection file. Writes to a temp file in the same
    /// directory and renames it over the target so readers never see a
    /// partial write.
    pub async fn save<T>(&self, records: &[T]) -> AppResult<()>
    where
        T: Entity + Serialize,
    {
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", T::COLLECTION));
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, self.path::<T>()).await?;
        Ok(())
    }

    /// First record with the given id, if any
    pub async fn find_by_id<T>(&self, id: i32) -> Option<T>
    where
        T: Entity + DeserializeOwned,
    {
        self.load::<T>().await.into_iter().find(|r| r.id() == id)
    }

    /// Remove the record with the given id. Saves only when something
    /// was removed; absent ids are a no-op.
    pub async fn delete_by_id<T>(&self, id: i32) -> AppResult<bool>
    where
        T: Entity + DeserializeOwned + Serialize,
    {
        let lock = self.lock_for::<T>();
        let _guard = lock.lock().await;

        let mut records = self.load::<T>().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records).await?;
        Ok(true)
    }

    /// Next id for an insert: `max(existing) + 1`, or 1 when empty
    pub fn next_id<T: Entity>(records: &[T]) -> i32 {
        records.iter().map(Entity::id).max().map_or(1, |max| max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();
        (dir, store)
    }

    fn book(id: i32, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: String::new(),
            isbn: String::new(),
            genre: String::new(),
            quantity: 0,
            published_date: None,
            publisher: String::new(),
            language: String::new(),
            shelf_location: String::new(),
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let (_dir, store) = store();
        assert!(store.load::<Book>().await.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_file_is_empty() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("Books.json"), b"{not json").unwrap();
        assert!(store.load::<Book>().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (_dir, store) = store();
        store.save(&[book(1, "a"), book(2, "b")]).await.unwrap();
        let loaded = store.load::<Book>().await;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].title, "b");
    }

    #[tokio::test]
    async fn delete_absent_id_is_noop() {
        let (dir, store) = store();
        assert!(!store.delete_by_id::<Book>(7).await.unwrap());
        assert!(!dir.path().join("Books.json").exists());
    }

    #[tokio::test]
    async fn delete_removes_and_persists() {
        let (_dir, store) = store();
        store.save(&[book(1, "a"), book(2, "b")]).await.unwrap();
        assert!(store.delete_by_id::<Book>(1).await.unwrap());
        let loaded = store.load::<Book>().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(JsonStore::next_id::<Book>(&[]), 1);
        assert_eq!(JsonStore::next_id(&[book(3, "x"), book(1, "y")]), 4);
    }
}
