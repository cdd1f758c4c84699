use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecordStore, StoreError, sort_and_filter};
use crate::items::{ItemKind, Profile, SavedItem};

/// In-memory storage for testing and one-off sessions.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, Vec<SavedItem>>>,
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_items(
        &self,
        user_id: Uuid,
        kind: Option<ItemKind>,
    ) -> Result<Vec<SavedItem>, StoreError> {
        let items = self.items.read().await;
        let owned = items.get(&user_id).cloned().unwrap_or_default();
        Ok(sort_and_filter(owned, kind))
    }

    async fn get_item(&self, user_id: Uuid, id: Uuid) -> Result<Option<SavedItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items
            .get(&user_id)
            .and_then(|list| list.iter().find(|item| item.id == id))
            .cloned())
    }

    async fn upsert_item(&self, item: &SavedItem) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let list = items.entry(item.user_id).or_default();
        match list.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => list.push(item.clone()),
        }
        Ok(())
    }

    async fn delete_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let Some(list) = items.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|item| item.id != id);
        Ok(list.len() != before)
    }

    async fn load_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .await
            .insert(profile.id, profile.clone());
        Ok(())
    }
}
