use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use super::ObjectStore;
use crate::error::BrowseError;
use crate::vfs::ObjectEntry;

/// In-memory object store, keyed by bucket then object key
#[derive(Default)]
pub struct MemoryStore {
    buckets: RwLock<HashMap<String, BTreeMap<String, Bytes>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bucket. Listing a bucket that was never created fails.
    pub fn create_bucket(&self, bucket: &str) {
        if let Ok(mut buckets) = self.buckets.write() {
            buckets.entry(bucket.to_string()).or_default();
        }
    }

    /// Insert an object directly, creating the bucket if needed
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        if let Ok(mut buckets) = self.buckets.write() {
            buckets
                .entry(bucket.to_string())
                .or_default()
                .insert(key.to_string(), body.into());
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectEntry>, BrowseError> {
        let buckets = self.buckets.read().map_err(BrowseError::unavailable)?;
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| BrowseError::unavailable(format!("no such bucket: {bucket}")))?;

        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, body)| ObjectEntry::new(key.clone(), body.len() as u64))
            .collect())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), BrowseError> {
        let mut buckets = self.buckets.write().map_err(BrowseError::unavailable)?;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| BrowseError::unavailable(format!("no such bucket: {bucket}")))?;
        objects.insert(key.to_string(), body);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, BrowseError> {
        let buckets = self.buckets.read().map_err(BrowseError::unavailable)?;
        buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| BrowseError::unavailable(format!("no such key: {bucket}/{key}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_sorted_and_prefixed() {
        let store = MemoryStore::new();
        store.insert("b", "z.txt", "z");
        store.insert("b", "a/one", "1");
        store.insert("b", "a/", "");
        store.insert("b", "ab", "ab");

        let all = store.list_objects("b", "").await.unwrap();
        let keys: Vec<_> = all.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a/", "a/one", "ab", "z.txt"]);

        let under_a = store.list_objects("b", "a/").await.unwrap();
        let keys: Vec<_> = under_a.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a/", "a/one"]);
        assert_eq!(under_a[1].size, 1);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.create_bucket("b");
        store.put_object("b", "k", Bytes::from("old")).await.unwrap();
        store.put_object("b", "k", Bytes::from("newer")).await.unwrap();

        assert_eq!(store.get_object("b", "k").await.unwrap(), Bytes::from("newer"));
    }

    #[tokio::test]
    async fn test_missing_bucket_is_unavailable() {
        let store = MemoryStore::new();
        let err = store.list_objects("nope", "").await.unwrap_err();
        assert!(matches!(err, BrowseError::StoreUnavailable { .. }));

        let err = store.get_object("nope", "k").await.unwrap_err();
        assert!(matches!(err, BrowseError::StoreUnavailable { .. }));
    }
}
