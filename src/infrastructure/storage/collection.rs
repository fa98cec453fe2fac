use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, StorageError, StorageResult};

/// A whole collection of `T` persisted as one JSON array under a fixed key
///
/// An absent key loads as an empty collection.
pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Writes an empty array if the key is absent; leaves existing data alone
    pub fn initialize(&self) -> StorageResult<()> {
        if self.store.read(self.key)?.is_none() {
            self.store.write(self.key, "[]")?;
            tracing::debug!(key = self.key, "Initialized empty collection");
        }
        Ok(())
    }

    /// Loads every element, in stored order
    pub fn load(&self) -> StorageResult<Vec<T>> {
        match self.store.read(self.key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: self.key.to_string(),
                source,
            }),
        }
    }

    /// Replaces the stored collection with `items`
    ///
    /// Serialization happens before anything is written, so an encoding
    /// failure leaves the stored collection untouched.
    pub fn save(&self, items: &[T]) -> StorageResult<()> {
        let raw = serde_json::to_string(items)?;
        self.store.write(self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        qty: u32,
    }

    fn collection() -> (Arc<MemoryStore>, JsonCollection<Item>) {
        let store = Arc::new(MemoryStore::new());
        let collection = JsonCollection::new(store.clone(), "items");
        (store, collection)
    }

    #[test]
    fn absent_collection_loads_empty() {
        let (_, items) = collection();
        assert!(items.load().unwrap().is_empty());
    }

    #[test]
    fn initialize_writes_empty_array_once() {
        let (store, items) = collection();
        items.initialize().unwrap();
        assert_eq!(store.read("items").unwrap().as_deref(), Some("[]"));

        items
            .save(&[Item {
                id: "a".into(),
                qty: 1,
            }])
            .unwrap();
        items.initialize().unwrap();
        assert_eq!(items.load().unwrap().len(), 1);
    }

    #[test]
    fn saved_sequence_reads_back_element_wise() {
        let (_, items) = collection();
        let written = vec![
            Item {
                id: "a".into(),
                qty: 1,
            },
            Item {
                id: "b".into(),
                qty: 2,
            },
        ];
        items.save(&written).unwrap();
        assert_eq!(items.load().unwrap(), written);
    }

    #[test]
    fn malformed_data_is_reported() {
        let (store, items) = collection();
        store.write("items", "{not json").unwrap();
        assert!(matches!(items.load(), Err(StorageError::Malformed { .. })));
    }
}
