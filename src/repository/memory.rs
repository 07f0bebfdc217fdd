//! In-memory store: aggregates kept behind an async `RwLock`.

use super::{Datastore, OwnerRepository, PetRepository, VetRepository, VisitRepository};
use crate::error::AppError;
use crate::model::{Owner, Page, PageRequest, Pet, PetType, Specialty, Vet, Visit};
use crate::seed;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    owners: BTreeMap<i32, Owner>,
    pet_types: Vec<PetType>,
    vets: Vec<Vet>,
    next_owner_id: i32,
    next_pet_id: i32,
    next_visit_id: i32,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let tables = Tables {
            next_owner_id: 1,
            next_pet_id: 1,
            next_visit_id: 1,
            ..Tables::default()
        };
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }

    /// Store preloaded with the sample clinic.
    pub fn seeded() -> Self {
        let pet_types: Vec<PetType> = seed::PET_TYPES
            .iter()
            .map(|(id, name)| PetType {
                id: *id,
                name: name.to_string(),
            })
            .collect();

        let mut owners: BTreeMap<i32, Owner> = seed::OWNERS
            .iter()
            .map(|(id, first, last, address, city, telephone)| {
                let owner = Owner {
                    id: Some(*id),
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    address: address.to_string(),
                    city: city.to_string(),
                    telephone: telephone.to_string(),
                    pets: Vec::new(),
                };
                (*id, owner)
            })
            .collect();

        for (id, name, birth, type_id, owner_id) in seed::PETS {
            let visits = seed::VISITS
                .iter()
                .filter(|v| v.1 == *id)
                .map(|(visit_id, _, date, description)| Visit {
                    id: Some(*visit_id),
                    date: seed::date(date),
                    description: description.to_string(),
                })
                .collect();
            if let Some(owner) = owners.get_mut(owner_id) {
                owner.pets.push(Pet {
                    id: Some(*id),
                    name: name.to_string(),
                    birth_date: Some(seed::date(birth)),
                    pet_type: pet_types.iter().find(|t| t.id == *type_id).cloned(),
                    visits,
                });
            }
        }
        for owner in owners.values_mut() {
            owner.sort_children();
        }

        let vets = seed::VETS
            .iter()
            .map(|(id, first, last)| {
                let mut specialties: Vec<Specialty> = seed::VET_SPECIALTIES
                    .iter()
                    .filter(|(vet_id, _)| vet_id == id)
                    .filter_map(|(_, sid)| seed::SPECIALTIES.iter().find(|(s, _)| s == sid))
                    .map(|(sid, name)| Specialty {
                        id: *sid,
                        name: name.to_string(),
                        is_new: false,
                    })
                    .collect();
                specialties.sort_by(|a, b| a.name.cmp(&b.name));
                Vet {
                    id: *id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    specialties,
                }
            })
            .collect();

        let tables = Tables {
            next_owner_id: seed::OWNERS.len() as i32 + 1,
            next_pet_id: seed::PETS.len() as i32 + 1,
            next_visit_id: seed::VISITS.len() as i32 + 1,
            owners,
            pet_types,
            vets,
        };
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl OwnerRepository for MemoryStore {
    async fn find_owners_by_last_name(
        &self,
        last_name: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, AppError> {
        let tables = self.tables.read().await;
        let matches: Vec<Owner> = tables
            .owners
            .values()
            .filter(|o| o.last_name.starts_with(last_name))
            .cloned()
            .collect();
        Ok(Page::from_all(matches, page))
    }

    async fn find_owner(&self, id: i32) -> Result<Option<Owner>, AppError> {
        Ok(self.tables.read().await.owners.get(&id).cloned())
    }

    async fn save_owner(&self, owner: &mut Owner) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        match owner.id {
            None => {
                let id = tables.next_owner_id;
                tables.next_owner_id += 1;
                owner.id = Some(id);
                tables.owners.insert(id, owner.clone());
            }
            Some(id) => {
                let stored = tables
                    .owners
                    .get_mut(&id)
                    .ok_or_else(|| AppError::NotFound(format!("Owner not found with id: {}", id)))?;
                stored.first_name = owner.first_name.clone();
                stored.last_name = owner.last_name.clone();
                stored.address = owner.address.clone();
                stored.city = owner.city.clone();
                stored.telephone = owner.telephone.clone();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PetRepository for MemoryStore {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, AppError> {
        let mut types = self.tables.read().await.pet_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn save_pet(&self, owner_id: i32, pet: &mut Pet) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if pet.id.is_none() {
            pet.id = Some(tables.next_pet_id);
            tables.next_pet_id += 1;
        }
        let owner = tables
            .owners
            .get_mut(&owner_id)
            .ok_or_else(|| AppError::NotFound(format!("Owner not found with id: {}", owner_id)))?;
        match owner.pets.iter_mut().find(|p| p.id == pet.id) {
            Some(stored) => {
                stored.name = pet.name.clone();
                stored.birth_date = pet.birth_date;
                stored.pet_type = pet.pet_type.clone();
            }
            None => owner.pets.push(pet.clone()),
        }
        owner.sort_children();
        Ok(())
    }
}

#[async_trait]
impl VisitRepository for MemoryStore {
    async fn save_visit(&self, pet_id: i32, visit: &mut Visit) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if visit.id.is_none() {
            visit.id = Some(tables.next_visit_id);
            tables.next_visit_id += 1;
        }
        let owner = tables
            .owners
            .values_mut()
            .find(|o| o.pet(pet_id).is_some())
            .ok_or_else(|| AppError::NotFound(format!("Pet not found with id: {}", pet_id)))?;
        if let Some(pet) = owner.pets.iter_mut().find(|p| p.id == Some(pet_id)) {
            pet.visits.retain(|v| v.id != visit.id);
            pet.visits.push(visit.clone());
        }
        owner.sort_children();
        Ok(())
    }
}

#[async_trait]
impl VetRepository for MemoryStore {
    async fn find_vets(&self) -> Result<Vec<Vet>, AppError> {
        let mut vets = self.tables.read().await.vets.clone();
        vets.sort_by_key(|v| v.id);
        Ok(vets)
    }

    async fn find_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError> {
        Ok(Page::from_all(self.find_vets().await?, page))
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
