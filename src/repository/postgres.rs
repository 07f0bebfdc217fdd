//! PostgreSQL store. Aggregates are assembled from one query per table, batched by id.

use super::{Datastore, OwnerRepository, PetRepository, VetRepository, VisitRepository};
use crate::error::AppError;
use crate::model::{Owner, Page, PageRequest, Pet, PetType, Specialty, Vet, Visit};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::collections::HashMap;

const OWNER_COLUMNS: &str = "id, first_name, last_name, address, city, telephone";
const LAST_NAME_PREFIX: &str = "left(last_name, char_length($1)) = $1";

type OwnerRow = (i32, String, String, String, String, String);
type PetRow = (i32, String, Option<NaiveDate>, i32, Option<i32>, Option<String>);
type VisitRow = (i32, i32, NaiveDate, String);

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Attaches pets (ordered by name) and their visits (ordered by date) to `owners`.
    async fn load_pets(&self, owners: &mut [Owner]) -> Result<(), AppError> {
        let owner_ids: Vec<i32> = owners.iter().filter_map(|o| o.id).collect();
        if owner_ids.is_empty() {
            return Ok(());
        }
        let sql = "SELECT p.id, p.name, p.birth_date, p.owner_id, t.id, t.name \
                   FROM pets p LEFT JOIN types t ON t.id = p.type_id \
                   WHERE p.owner_id = ANY($1) ORDER BY p.name, p.id";
        tracing::debug!(sql = %sql, owners = ?owner_ids, "query");
        let pet_rows: Vec<PetRow> = sqlx::query_as(sql).bind(&owner_ids).fetch_all(&self.pool).await?;

        let pet_ids: Vec<i32> = pet_rows.iter().map(|r| r.0).collect();
        let mut visits_by_pet: HashMap<i32, Vec<Visit>> = HashMap::new();
        if !pet_ids.is_empty() {
            let sql = "SELECT id, pet_id, visit_date, description FROM visits \
                       WHERE pet_id = ANY($1) ORDER BY visit_date, id";
            tracing::debug!(sql = %sql, pets = ?pet_ids, "query");
            let visit_rows: Vec<VisitRow> = sqlx::query_as(sql).bind(&pet_ids).fetch_all(&self.pool).await?;
            for (id, pet_id, date, description) in visit_rows {
                visits_by_pet.entry(pet_id).or_default().push(Visit {
                    id: Some(id),
                    date,
                    description,
                });
            }
        }

        let mut pets_by_owner: HashMap<i32, Vec<Pet>> = HashMap::new();
        for (id, name, birth_date, owner_id, type_id, type_name) in pet_rows {
            let pet_type = match (type_id, type_name) {
                (Some(id), Some(name)) => Some(PetType { id, name }),
                _ => None,
            };
            pets_by_owner.entry(owner_id).or_default().push(Pet {
                id: Some(id),
                name,
                birth_date,
                pet_type,
                visits: visits_by_pet.remove(&id).unwrap_or_default(),
            });
        }
        for owner in owners.iter_mut() {
            if let Some(id) = owner.id {
                owner.pets = pets_by_owner.remove(&id).unwrap_or_default();
            }
        }
        Ok(())
    }

    async fn load_specialties(&self, vets: &mut [Vet]) -> Result<(), AppError> {
        let vet_ids: Vec<i32> = vets.iter().map(|v| v.id).collect();
        if vet_ids.is_empty() {
            return Ok(());
        }
        let sql = "SELECT vs.vet_id, s.id, s.name FROM vet_specialties vs \
                   JOIN specialties s ON s.id = vs.specialty_id \
                   WHERE vs.vet_id = ANY($1) ORDER BY s.name";
        tracing::debug!(sql = %sql, vets = ?vet_ids, "query");
        let rows: Vec<(i32, i32, String)> = sqlx::query_as(sql).bind(&vet_ids).fetch_all(&self.pool).await?;
        let mut by_vet: HashMap<i32, Vec<Specialty>> = HashMap::new();
        for (vet_id, id, name) in rows {
            by_vet.entry(vet_id).or_default().push(Specialty {
                id,
                name,
                is_new: false,
            });
        }
        for vet in vets.iter_mut() {
            vet.specialties = by_vet.remove(&vet.id).unwrap_or_default();
        }
        Ok(())
    }
}

fn owner_from_row(row: OwnerRow) -> Owner {
    let (id, first_name, last_name, address, city, telephone) = row;
    Owner {
        id: Some(id),
        first_name,
        last_name,
        address,
        city,
        telephone,
        pets: Vec::new(),
    }
}

fn vet_from_row(row: (i32, String, String)) -> Vet {
    Vet {
        id: row.0,
        first_name: row.1,
        last_name: row.2,
        specialties: Vec::new(),
    }
}

fn page_bounds(page: PageRequest) -> (i64, i64) {
    (i64::from(page.size), page.offset() as i64)
}

#[async_trait]
impl OwnerRepository for PgStore {
    async fn find_owners_by_last_name(
        &self,
        last_name: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, AppError> {
        let count_sql = format!("SELECT COUNT(*) FROM owners WHERE {}", LAST_NAME_PREFIX);
        let (total,): (i64,) = sqlx::query_as(&count_sql).bind(last_name).fetch_one(&self.pool).await?;

        let (limit, offset) = page_bounds(page);
        let sql = format!(
            "SELECT {} FROM owners WHERE {} ORDER BY id LIMIT $2 OFFSET $3",
            OWNER_COLUMNS, LAST_NAME_PREFIX
        );
        tracing::debug!(sql = %sql, last_name = %last_name, limit, offset, "query");
        let rows: Vec<OwnerRow> = sqlx::query_as(&sql)
            .bind(last_name)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let mut owners: Vec<Owner> = rows.into_iter().map(owner_from_row).collect();
        self.load_pets(&mut owners).await?;
        Ok(Page {
            items: owners,
            request: page,
            total_items: total.max(0) as u64,
        })
    }

    async fn find_owner(&self, id: i32) -> Result<Option<Owner>, AppError> {
        let sql = format!("SELECT {} FROM owners WHERE id = $1", OWNER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<OwnerRow> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut owners = [owner_from_row(row)];
        self.load_pets(&mut owners).await?;
        let [owner] = owners;
        Ok(Some(owner))
    }

    async fn save_owner(&self, owner: &mut Owner) -> Result<(), AppError> {
        match owner.id {
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO owners (first_name, last_name, address, city, telephone) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING id",
                )
                .bind(&owner.first_name)
                .bind(&owner.last_name)
                .bind(&owner.address)
                .bind(&owner.city)
                .bind(&owner.telephone)
                .fetch_one(&self.pool)
                .await?;
                owner.id = Some(id);
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE owners SET first_name = $1, last_name = $2, address = $3, city = $4, \
                     telephone = $5 WHERE id = $6",
                )
                .bind(&owner.first_name)
                .bind(&owner.last_name)
                .bind(&owner.address)
                .bind(&owner.city)
                .bind(&owner.telephone)
                .bind(id)
                .execute(&self.pool)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("Owner not found with id: {}", id)));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PetRepository for PgStore {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, AppError> {
        let rows: Vec<(i32, String)> = sqlx::query_as("SELECT id, name FROM types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| PetType { id, name }).collect())
    }

    async fn save_pet(&self, owner_id: i32, pet: &mut Pet) -> Result<(), AppError> {
        let type_id = pet.pet_type.as_ref().map(|t| t.id);
        match pet.id {
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO pets (name, birth_date, type_id, owner_id) VALUES ($1, $2, $3, $4) RETURNING id",
                )
                .bind(&pet.name)
                .bind(pet.birth_date)
                .bind(type_id)
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;
                pet.id = Some(id);
            }
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE pets SET name = $1, birth_date = $2, type_id = $3 WHERE id = $4 AND owner_id = $5",
                )
                .bind(&pet.name)
                .bind(pet.birth_date)
                .bind(type_id)
                .bind(id)
                .bind(owner_id)
                .execute(&self.pool)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("Pet not found with id: {}", id)));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl VisitRepository for PgStore {
    async fn save_visit(&self, pet_id: i32, visit: &mut Visit) -> Result<(), AppError> {
        match visit.id {
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    "INSERT INTO visits (pet_id, visit_date, description) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(pet_id)
                .bind(visit.date)
                .bind(&visit.description)
                .fetch_one(&self.pool)
                .await?;
                visit.id = Some(id);
            }
            Some(id) => {
                sqlx::query("UPDATE visits SET visit_date = $1, description = $2 WHERE id = $3 AND pet_id = $4")
                    .bind(visit.date)
                    .bind(&visit.description)
                    .bind(id)
                    .bind(pet_id)
                    .execute(&self.pool)
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl VetRepository for PgStore {
    async fn find_vets(&self) -> Result<Vec<Vet>, AppError> {
        let rows: Vec<(i32, String, String)> =
            sqlx::query_as("SELECT id, first_name, last_name FROM vets ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        let mut vets: Vec<Vet> = rows.into_iter().map(vet_from_row).collect();
        self.load_specialties(&mut vets).await?;
        Ok(vets)
    }

    async fn find_vets_page(&self, page: PageRequest) -> Result<Page<Vet>, AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vets").fetch_one(&self.pool).await?;
        let (limit, offset) = page_bounds(page);
        let rows: Vec<(i32, String, String)> =
            sqlx::query_as("SELECT id, first_name, last_name FROM vets ORDER BY id LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
        let mut vets: Vec<Vet> = rows.into_iter().map(vet_from_row).collect();
        self.load_specialties(&mut vets).await?;
        Ok(Page {
            items: vets,
            request: page,
            total_items: total.max(0) as u64,
        })
    }
}

#[async_trait]
impl Datastore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
