//! Shared application state, wired explicitly from a datastore and settings.

use crate::config::Settings;
use crate::repository::{CachedVetRepository, Datastore, VetRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    /// Vet reads go through the cache; everything else hits `store` directly.
    pub vets: CachedVetRepository,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new<D>(store: D, settings: Settings) -> Self
    where
        D: Datastore + 'static,
    {
        let store = Arc::new(store);
        let vet_source: Arc<dyn VetRepository> = store.clone();
        let vets = CachedVetRepository::new(vet_source, settings.vet_cache_capacity, settings.vet_cache_ttl);
        AppState {
            store,
            vets,
            settings: Arc::new(settings),
        }
    }
}
