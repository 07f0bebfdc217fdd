//! Data access: one trait per aggregate, implemented by the PostgreSQL and in-memory stores.

mod cache;
mod memory;
mod postgres;

pub use cache::CachedVetRepository;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{Owner, Page, PageRequest, Pet, PetType, Vet, Visit};
use async_trait::async_trait;

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Owners whose last name starts with `last_name`, ordered by id, each with its pets.
    async fn find_owners_by_last_name(
        &self,
        last_name: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, AppError>;

    /// Full aggregate: pets (by name) and their visits (by date).
    async fn find_owner(&self, id: i32) -> Result<Option<Owner>, AppError>;

    /// Inserts when `owner.id` is `None` (and assigns it), otherwise updates the scalar fields.
    async fn save_owner(&self, owner: &mut Owner) -> Result<(), AppError>;
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, AppError>;

    /// Inserts or updates `pet` under `owner_id`; assigns the id on insert.
    async fn save_pet(&self, owner_id: i32, pet: &mut Pet) -> Result<(), AppError>;
}

#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn save_visit(&self, pet_id: i32, visit: &mut Visit) -> Result<(), AppError>;
}

#[async_trait]
pub trait VetRepository: Send + Sync {
    /// Every vet ordered by id, specialties ordered by name.
    async fn find_vets(&self) -> Result<Vec<Vet>, AppError>;

    async fn find_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError>;
}

/// Everything the handlers need from storage.
#[async_trait]
pub trait Datastore: OwnerRepository + PetRepository + VisitRepository + VetRepository {
    async fn ping(&self) -> Result<(), AppError>;
}
