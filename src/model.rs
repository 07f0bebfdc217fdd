//! Clinic entities. `id == None` marks an entity that has not been persisted yet.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Owner {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn pet(&self, pet_id: i32) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == Some(pet_id))
    }

    /// Case-insensitive lookup by name.
    pub fn pet_named(&self, name: &str) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn pet_names(&self) -> String {
        self.pets.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")
    }

    pub fn sort_children(&mut self) {
        self.pets.sort_by(|a, b| a.name.cmp(&b.name));
        for pet in &mut self.pets {
            pet.visits.sort_by_key(|v| v.date);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PetType {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pet {
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetType>,
    pub visits: Vec<Visit>,
}

impl Pet {
    pub fn type_name(&self) -> &str {
        self.pet_type.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }

    pub fn birth_date_label(&self) -> String {
        self.birth_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Visit {
    pub id: Option<i32>,
    pub date: NaiveDate,
    pub description: String,
}

impl Visit {
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: i32,
    pub name: String,
    #[serde(rename = "new")]
    pub is_new: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<Specialty>,
}

impl Vet {
    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    pub fn specialty_names(&self) -> String {
        if self.specialties.is_empty() {
            return "none".to_string();
        }
        self.specialties.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(" ")
    }
}

/// JSON shape of one vet in the directory API.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetResource<'a> {
    #[serde(flatten)]
    pub vet: &'a Vet,
    pub nr_of_specialties: usize,
    #[serde(rename = "new")]
    pub is_new: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vets<'a> {
    pub vet_list: Vec<VetResource<'a>>,
}

impl<'a> Vets<'a> {
    pub fn new(vets: &'a [Vet]) -> Self {
        Vets {
            vet_list: vets
                .iter()
                .map(|vet| VetResource {
                    vet,
                    nr_of_specialties: vet.nr_of_specialties(),
                    is_new: false,
                })
                .collect(),
        }
    }
}

/// 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        PageRequest {
            number: number.max(1),
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub request: PageRequest,
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Slices an already-complete, ordered result set.
    pub fn from_all(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Page {
            items,
            request,
            total_items,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.request.size);
        ((self.total_items + size - 1) / size) as u32
    }
}
