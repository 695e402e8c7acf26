//! ObjectStore trait definition
//!
//! This trait defines the storage-backend interface csync needs: list a
//! container page by page, transfer a named object to or from a local
//! file, and delete a named object. It decouples the reconciliation and
//! execution logic from the specific storage SDK and can be mocked for
//! testing.

use std::path::Path;

use async_trait::async_trait;

use crate::entry::FileEntry;
use crate::error::Result;

/// One page of a container listing
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Objects in this page
    pub entries: Vec<FileEntry>,

    /// Continuation token; `Some` when the listing is truncated
    pub next_token: Option<String>,
}

/// Trait for object-storage backends
///
/// All four operations may fail independently; failures must not corrupt
/// the container's listing state.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether a container exists
    async fn container_exists(&self, container: &str) -> Result<bool>;

    /// List one page of objects in a container
    async fn list_page(&self, container: &str, token: Option<String>) -> Result<ListPage>;

    /// Upload a local file as a named object
    async fn put_object(&self, container: &str, key: &str, source: &Path) -> Result<()>;

    /// Download a named object to a local file
    async fn get_object(&self, container: &str, key: &str, dest: &Path) -> Result<()>;

    /// Delete a named object
    async fn delete_object(&self, container: &str, key: &str) -> Result<()>;
}
