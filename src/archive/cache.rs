use std::sync::Arc;

use tokio::sync::OnceCell;

use super::{ArchiveClient, ArchiveError, DEFAULT_TABLE, DEFAULT_URL};
use crate::models::Catalog;

/// Process-lifetime memo of the archive query.
///
/// The first [`load`](Self::load) performs the fetch; concurrent callers wait
/// on that single in-flight request. Once populated the catalog is never
/// refreshed. A failed fetch leaves the cell empty.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    client: ArchiveClient,
    cell: Arc<OnceCell<Arc<Catalog>>>,
}

impl CatalogCache {
    /// A cache that fetches lazily through `client`.
    pub fn new(client: ArchiveClient) -> Self {
        Self {
            client,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// A cache that already holds `catalog` and never touches the network.
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            client: ArchiveClient::new(DEFAULT_URL, DEFAULT_TABLE),
            cell: Arc::new(OnceCell::new_with(Some(Arc::new(catalog)))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn load(&self) -> Result<Arc<Catalog>, ArchiveError> {
        let catalog = self
            .cell
            .get_or_try_init(|| async { self.client.fetch_catalog().await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn preloaded_cache_returns_same_catalog() {
        let cache = CatalogCache::preloaded(Catalog::from_rows(Vec::new(), Utc::now()));
        assert!(cache.is_loaded());

        let first = cache.load().await.unwrap();
        let second = cache.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn lazy_cache_starts_empty() {
        let cache = CatalogCache::new(ArchiveClient::new("http://127.0.0.1:9", "pscomppars"));
        assert!(!cache.is_loaded());
    }
}
