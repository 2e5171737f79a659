//! In-memory storage backend for tests

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ArchiveStorage, ObjectSummary, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

/// Bucket kept in a shared map.
///
/// Clones share the same contents, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    fail_list: Arc<Mutex<bool>>,
    fail_put: Arc<Mutex<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object with an explicit modification time.
    pub fn insert(&self, key: &str, data: impl Into<Bytes>, last_modified: DateTime<Utc>) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data: data.into(),
                content_type: "image/jpeg".to_string(),
                last_modified,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_fail_list(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    pub fn set_fail_put(&self, fail: bool) {
        *self.fail_put.lock().unwrap() = fail;
    }
}

#[async_trait]
impl ArchiveStorage for MemoryStorage {
    async fn list_objects(&self) -> StorageResult<Vec<ObjectSummary>> {
        if *self.fail_list.lock().unwrap() {
            return Err(StorageError::ListFailed("simulated list failure".to_string()));
        }
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .map(|(key, obj)| ObjectSummary::new(key.clone(), obj.last_modified))
            .collect())
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        if *self.fail_put.lock().unwrap() {
            return Err(StorageError::UploadFailed("simulated upload failure".to_string()));
        }

        let mut objects = self.objects.lock().unwrap();
        // Keep modification times strictly increasing even within one clock tick.
        let newest = objects.values().map(|o| o.last_modified).max();
        let now = Utc::now();
        let last_modified = match newest {
            Some(prev) if prev >= now => prev + chrono::Duration::milliseconds(1),
            _ => now,
        };

        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                last_modified,
            },
        );
        Ok(())
    }

    fn bucket(&self) -> &str {
        "memory"
    }
}
