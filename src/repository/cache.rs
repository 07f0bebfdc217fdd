//! Read-through cache in front of a `VetRepository`, backed by moka.

use super::VetRepository;
use crate::error::AppError;
use crate::model::{Page, PageRequest, Vet};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Cache key: the full directory or one page of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum VetQuery {
    All,
    Page(PageRequest),
}

#[derive(Clone)]
pub struct CachedVetRepository {
    inner: Arc<dyn VetRepository>,
    all: Cache<VetQuery, Arc<Vec<Vet>>>,
    pages: Cache<VetQuery, Arc<Page<Vet>>>,
}

impl CachedVetRepository {
    pub fn new(inner: Arc<dyn VetRepository>, max_capacity: u64, ttl: Duration) -> Self {
        CachedVetRepository {
            inner,
            all: Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build(),
            pages: Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build(),
        }
    }

    pub fn invalidate_all(&self) {
        self.all.invalidate_all();
        self.pages.invalidate_all();
    }
}

#[async_trait]
impl VetRepository for CachedVetRepository {
    async fn find_vets(&self) -> Result<Vec<Vet>, AppError> {
        if let Some(cached) = self.all.get(&VetQuery::All).await {
            tracing::debug!("vets served from cache");
            return Ok(cached.as_ref().clone());
        }
        let vets = self.inner.find_vets().await?;
        self.all.insert(VetQuery::All, Arc::new(vets.clone())).await;
        Ok(vets)
    }

    async fn find_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError> {
        let key = VetQuery::Page(page);
        if let Some(cached) = self.pages.get(&key).await {
            tracing::debug!(page = page.number, "vet page served from cache");
            return Ok(cached.as_ref().clone());
        }
        let result = self.inner.find_vets_page(page).await?;
        self.pages.insert(key, Arc::new(result.clone())).await;
        Ok(result)
    }
}
