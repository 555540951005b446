//! Item records and the shared item store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// A stored item record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier, assigned by the store. Never reused.
    pub id: u64,
    /// Item name.
    pub name: String,
    /// Item price.
    pub price: f64,
    /// Optional free-form description. Serialized as `null` when absent.
    pub description: Option<String>,
    /// Creation timestamp. Immutable once set.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update timestamp. Absent until the first update.
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
    /// Set to `true` by the background processor. Absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<bool>,
}

/// Client-supplied item fields, used for both create and full update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewItem {
    /// Item name.
    pub name: String,
    /// Item price.
    pub price: f64,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Shared in-memory item store.
///
/// Ids come from a monotonic counter starting at 1, so they stay unique
/// across deletes. Cloning the store clones the handle, not the data.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Arc<DashMap<u64, Item>>,
    next_id: Arc<AtomicU64>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored items, ordered by id (insertion order).
    pub fn list(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Store a new item, assigning the next id and stamping `created_at`.
    pub fn insert(&self, new: NewItem) -> Item {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let item = Item {
            id,
            name: new.name,
            price: new.price,
            description: new.description,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
            processed: None,
        };
        self.items.insert(id, item.clone());
        item
    }

    /// Fetch an item by id.
    pub fn get(&self, id: u64) -> Option<Item> {
        self.items.get(&id).map(|e| e.value().clone())
    }

    /// Replace an item's client-supplied fields, keeping `created_at` and
    /// stamping `updated_at`. Returns the new stored state, or `None` if
    /// the id is absent (nothing is created in that case).
    pub fn update(&self, id: u64, new: NewItem) -> Option<Item> {
        let mut entry = self.items.get_mut(&id)?;
        entry.name = new.name;
        entry.price = new.price;
        entry.description = new.description;
        entry.updated_at = Some(OffsetDateTime::now_utc());
        Some(entry.clone())
    }

    /// Remove an item, returning the removed record.
    pub fn remove(&self, id: u64) -> Option<Item> {
        self.items.remove(&id).map(|(_, item)| item)
    }

    /// Set the `processed` flag if the item still exists.
    ///
    /// Returns whether the item was present. Repeated calls are idempotent.
    pub fn mark_processed(&self, id: u64) -> bool {
        match self.items.get_mut(&id) {
            Some(mut entry) => {
                entry.processed = Some(true);
                true
            }
            None => false,
        }
    }

    /// Whether an item exists under this id.
    pub fn contains(&self, id: u64) -> bool {
        self.items.contains_key(&id)
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn widget() -> NewItem {
        NewItem {
            name: "Widget".to_string(),
            price: 9.99,
            description: None,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids_from_one() {
        let store = ItemStore::new();

        let first = store.insert(widget());
        let second = store.insert(widget());

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn inserted_item_round_trips_through_get() {
        let store = ItemStore::new();

        let created = store.insert(NewItem {
            name: "Widget".to_string(),
            price: 9.99,
            description: Some("blue".to_string()),
        });

        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.price, 9.99);
        assert_eq!(fetched.description.as_deref(), Some("blue"));
        assert!(fetched.updated_at.is_none());
        assert!(fetched.processed.is_none());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = ItemStore::new();

        let first = store.insert(widget());
        store.remove(first.id).unwrap();
        let second = store.insert(widget());

        assert_ne!(first.id, second.id);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn update_merges_fields_and_stamps_updated_at() {
        let store = ItemStore::new();
        let created = store.insert(widget());

        let updated = store
            .update(
                created.id,
                NewItem {
                    name: "Gadget".to_string(),
                    price: 19.99,
                    description: Some("improved".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.price, 19.99);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn update_missing_id_creates_nothing() {
        let store = ItemStore::new();

        assert!(store.update(42, widget()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_then_get_is_none() {
        let store = ItemStore::new();
        let created = store.insert(widget());

        assert!(store.remove(created.id).is_some());
        assert!(store.get(created.id).is_none());
        assert!(store.remove(created.id).is_none());
    }

    #[test]
    fn list_reflects_live_items_in_id_order() {
        let store = ItemStore::new();
        let a = store.insert(widget());
        let b = store.insert(widget());
        let c = store.insert(widget());

        store.remove(b.id).unwrap();

        let ids: Vec<u64> = store.list().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn mark_processed_sets_flag_only_when_present() {
        let store = ItemStore::new();
        let created = store.insert(widget());

        assert!(store.mark_processed(created.id));
        assert_eq!(store.get(created.id).unwrap().processed, Some(true));

        store.remove(created.id).unwrap();
        assert!(!store.mark_processed(created.id));
    }

    #[test]
    fn clones_share_state() {
        let store = ItemStore::new();
        let clone = store.clone();

        store.insert(widget());

        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn item_serializes_description_as_null() {
        let store = ItemStore::new();
        let created = store.insert(widget());

        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["description"], serde_json::Value::Null);
        assert!(json.get("updated_at").is_none());
        assert!(json.get("processed").is_none());
    }
}
