use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{RecordStore, StoreError, sort_and_filter};
use crate::items::{ItemKind, Profile, SavedItem};

/// JSON files on disk, one per user and record type:
///
/// ```text
/// <base>/items/<user-id>.json     saved items
/// <base>/profiles/<user-id>.json  profile
/// ```
pub struct FileStore {
    base_path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn items_path(&self, user_id: Uuid) -> PathBuf {
        self.base_path
            .join("items")
            .join(format!("{}.json", user_id))
    }

    fn profile_path(&self, user_id: Uuid) -> PathBuf {
        self.base_path
            .join("profiles")
            .join(format!("{}.json", user_id))
    }

    async fn load_items(&self, user_id: Uuid) -> Result<Vec<SavedItem>, StoreError> {
        Ok(read_json(&self.items_path(user_id)).await?.unwrap_or_default())
    }

    async fn save_items(&self, user_id: Uuid, items: &[SavedItem]) -> Result<(), StoreError> {
        write_json(&self.items_path(user_id), items).await
    }
}

/// Read and parse a JSON file; `None` if it doesn't exist.
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Write JSON through a temp file and rename, so readers never see a
/// half-written file.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!(path = %path.display(), "wrote records");
    Ok(())
}

#[async_trait]
impl RecordStore for FileStore {
    async fn list_items(
        &self,
        user_id: Uuid,
        kind: Option<ItemKind>,
    ) -> Result<Vec<SavedItem>, StoreError> {
        let items = self.load_items(user_id).await?;
        Ok(sort_and_filter(items, kind))
    }

    async fn get_item(&self, user_id: Uuid, id: Uuid) -> Result<Option<SavedItem>, StoreError> {
        let items = self.load_items(user_id).await?;
        Ok(items.into_iter().find(|item| item.id == id))
    }

    async fn upsert_item(&self, item: &SavedItem) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load_items(item.user_id).await?;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        self.save_items(item.user_id, &items).await
    }

    async fn delete_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load_items(user_id).await?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save_items(user_id, &items).await?;
        Ok(true)
    }

    async fn load_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        read_json(&self.profile_path(user_id)).await
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        write_json(&self.profile_path(profile.id), profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{CalculationItem, ColorItem};
    use crate::store::{save_item, set_display_name};

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("toolbelt-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_items_survive_reopen() {
        let dir = temp_dir();
        let user = Uuid::new_v4();

        let saved = {
            let store = FileStore::new(&dir);
            save_item(&store, user, CalculationItem::new("6 × 7", "42"))
                .await
                .unwrap()
        };

        let store = FileStore::new(&dir);
        let items = store.list_items(user, None).await.unwrap();
        assert_eq!(items, vec![saved.clone()]);
        assert!(dir.join("items").join(format!("{user}.json")).exists());

        assert!(store.delete_item(user, saved.id).await.unwrap());
        assert!(store.list_items(user, None).await.unwrap().is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_files_are_empty() {
        let store = FileStore::new(temp_dir());
        let user = Uuid::new_v4();
        assert!(store.list_items(user, None).await.unwrap().is_empty());
        assert!(store.load_profile(user).await.unwrap().is_none());
        assert!(!store.delete_item(user, Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_filter_and_profile() {
        let dir = temp_dir();
        let store = FileStore::new(&dir);
        let user = Uuid::new_v4();

        save_item(&store, user, CalculationItem::new("1 + 2", "3"))
            .await
            .unwrap();
        let color = crate::color::from_hex("#abcdef").unwrap();
        save_item(&store, user, ColorItem::from(&color)).await.unwrap();

        let calcs = store
            .list_items(user, Some(ItemKind::Calculation))
            .await
            .unwrap();
        assert_eq!(calcs.len(), 1);

        set_display_name(&store, user, Some("Grace".into()))
            .await
            .unwrap();
        let profile = store.load_profile(user).await.unwrap().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Grace"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = temp_dir();
        let user = Uuid::new_v4();
        std::fs::create_dir_all(dir.join("items")).unwrap();
        std::fs::write(dir.join("items").join(format!("{user}.json")), b"not json").unwrap();

        let store = FileStore::new(&dir);
        let err = store.list_items(user, None).await.unwrap_err();
        assert!(matches!(err, StoreError::Serde(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
