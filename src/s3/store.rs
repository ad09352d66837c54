use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BrowseError;
use crate::vfs::ObjectEntry;

/// Backing object store for the browser
///
/// Every call goes to the store; nothing is cached between requests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Flat listing of every object whose key starts with `prefix`, in the
    /// store's order (lexicographic by key)
    async fn list_objects(&self, bucket: &str, prefix: &str)
    -> Result<Vec<ObjectEntry>, BrowseError>;

    /// Store `body` under `key`. An existing object is replaced.
    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), BrowseError>;

    /// Fetch an object's full contents
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, BrowseError>;
}
