//! Persistence for saved items and profiles.
//!
//! The store is an external collaborator of the widgets: they never call it
//! themselves. Records are keyed by user, then by item id or record type.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::items::{ItemKind, ItemPayload, Profile, SavedItem};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Items belonging to `user_id`, newest first, optionally of one kind.
    async fn list_items(
        &self,
        user_id: Uuid,
        kind: Option<ItemKind>,
    ) -> Result<Vec<SavedItem>, StoreError>;

    async fn get_item(&self, user_id: Uuid, id: Uuid) -> Result<Option<SavedItem>, StoreError>;

    /// Insert or replace an item by id.
    async fn upsert_item(&self, item: &SavedItem) -> Result<(), StoreError>;

    /// Remove an item. Returns whether it existed.
    async fn delete_item(&self, user_id: Uuid, id: Uuid) -> Result<bool, StoreError>;

    async fn load_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError>;
}

/// Save `payload` for `user_id` under a fresh id and timestamp.
pub async fn save_item(
    store: &dyn RecordStore,
    user_id: Uuid,
    payload: impl Into<ItemPayload>,
) -> Result<SavedItem, StoreError> {
    let item = SavedItem::new(user_id, payload);
    store.upsert_item(&item).await?;
    info!(id = %item.id, kind = %item.kind(), "saved item");
    Ok(item)
}

/// Set the display name for `user_id`, stamping `updated_at`.
pub async fn set_display_name(
    store: &dyn RecordStore,
    user_id: Uuid,
    name: Option<String>,
) -> Result<Profile, StoreError> {
    let profile = Profile::new(user_id, name);
    store.upsert_profile(&profile).await?;
    info!(user = %user_id, "profile updated");
    Ok(profile)
}

/// Newest first, then filtered to `kind`. Items are stored in insertion
/// order, so equal timestamps keep the later insert first.
fn sort_and_filter(mut items: Vec<SavedItem>, kind: Option<ItemKind>) -> Vec<SavedItem> {
    items.retain(|item| kind.is_none_or(|k| item.kind() == k));
    items.reverse();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items
}
