//! Remote container lister
//!
//! Materializes the full remote view of a container before reconciliation
//! begins, paginating through the backend's listing as needed.

use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::exclude::ExcludeSet;
use crate::store::ObjectStore;

/// List every object in `container`, following continuation tokens until
/// the listing is exhausted. Entries matching an exclude pattern are
/// dropped here so they are never considered by the reconciler.
///
/// Fails fatally if the container does not exist; the tool never creates
/// containers.
pub async fn list_container(
    store: &dyn ObjectStore,
    container: &str,
    exclude: &ExcludeSet,
) -> Result<Vec<FileEntry>> {
    if !store.container_exists(container).await? {
        return Err(Error::NotFound(format!("Container not found: {container}")));
    }

    let mut entries = Vec::new();
    let mut token = None;

    loop {
        let page = store.list_page(container, token).await?;

        for entry in page.entries {
            if exclude.is_excluded(&entry.rel_path) {
                tracing::debug!(path = %entry.rel_path, "excluded from remote listing");
                continue;
            }
            entries.push(entry);
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    tracing::debug!(count = entries.len(), container, "remote listing complete");

    Ok(entries)
}
