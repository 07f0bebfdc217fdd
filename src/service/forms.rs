//! Submitted form payloads. Absent fields keep the values of the entity they are applied to;
//! present-but-empty fields overwrite them (and usually fail validation).

use super::FieldErrors;
use crate::i18n::Message;
use crate::model::{Owner, Pet, PetType, Visit};
use chrono::NaiveDate;
use serde::Deserialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerForm {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
}

impl OwnerForm {
    pub fn apply(self, mut owner: Owner) -> Owner {
        let fields = [
            (self.first_name, &mut owner.first_name),
            (self.last_name, &mut owner.last_name),
            (self.address, &mut owner.address),
            (self.city, &mut owner.city),
            (self.telephone, &mut owner.telephone),
        ];
        for (submitted, target) in fields {
            if let Some(value) = submitted {
                *target = value.trim().to_string();
            }
        }
        owner
    }

    /// The submitted id, when present, must match the owner being edited.
    pub fn id_matches(&self, owner_id: i32) -> bool {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(raw) => raw.parse::<i32>().map(|id| id == owner_id).unwrap_or(false),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetForm {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<String>,
}

impl PetForm {
    /// Binds the submission onto `pet`. Unparseable dates and unknown types are recorded in
    /// `errors` and leave the field empty.
    pub fn apply(self, mut pet: Pet, types: &[PetType], errors: &mut FieldErrors) -> Pet {
        if let Some(name) = self.name {
            pet.name = name.trim().to_string();
        }
        if let Some(raw) = self.birth_date {
            pet.birth_date = if raw.trim().is_empty() {
                None
            } else {
                let parsed = parse_date(&raw);
                if parsed.is_none() {
                    errors.reject("birthDate", Message::InvalidDate);
                }
                parsed
            };
        }
        if let Some(raw) = self.pet_type {
            let wanted = raw.trim();
            pet.pet_type = if wanted.is_empty() {
                None
            } else {
                let found = types
                    .iter()
                    .find(|t| t.name.eq_ignore_ascii_case(wanted) || t.id.to_string() == wanted)
                    .cloned();
                if found.is_none() {
                    errors.reject("type", Message::UnknownPetType);
                }
                found
            };
        }
        pet
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitForm {
    pub date: Option<String>,
    pub description: Option<String>,
}

impl VisitForm {
    pub fn apply(self, mut visit: Visit, errors: &mut FieldErrors) -> Visit {
        if let Some(description) = self.description {
            visit.description = description.trim().to_string();
        }
        if let Some(raw) = self.date.filter(|d| !d.trim().is_empty()) {
            match parse_date(&raw) {
                Some(date) => visit.date = date,
                None => errors.reject("date", Message::InvalidDate),
            }
        }
        visit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types() -> Vec<PetType> {
        vec![
            PetType {
                id: 1,
                name: "cat".into(),
            },
            PetType {
                id: 6,
                name: "hamster".into(),
            },
        ]
    }

    #[test]
    fn empty_owner_form_keeps_everything() {
        let stored = Owner {
            id: Some(1),
            last_name: "Franklin".into(),
            telephone: "6085551023".into(),
            ..Owner::default()
        };
        assert_eq!(OwnerForm::default().apply(stored.clone()), stored);
    }

    #[test]
    fn owner_form_overwrites_submitted_fields() {
        let form: OwnerForm = serde_urlencoded::from_str("lastName=Bloggs&address=").unwrap();
        let owner = form.apply(Owner {
            last_name: "Franklin".into(),
            address: "110 W. Liberty St.".into(),
            city: "Madison".into(),
            ..Owner::default()
        });
        assert_eq!(owner.last_name, "Bloggs");
        assert_eq!(owner.address, "");
        assert_eq!(owner.city, "Madison");
    }

    #[test]
    fn owner_id_check() {
        let form: OwnerForm = serde_urlencoded::from_str("id=2").unwrap();
        assert!(!form.id_matches(1));
        assert!(form.id_matches(2));
        assert!(OwnerForm::default().id_matches(1));
    }

    #[test]
    fn pet_form_resolves_type_and_date() {
        let form: PetForm = serde_urlencoded::from_str("name=Betty&type=hamster&birthDate=2015-02-12").unwrap();
        let mut errors = FieldErrors::default();
        let pet = form.apply(Pet::default(), &types(), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(pet.type_name(), "hamster");
        assert_eq!(pet.birth_date_label(), "2015-02-12");
    }

    #[test]
    fn pet_form_flags_bad_date_and_unknown_type() {
        let form: PetForm = serde_urlencoded::from_str("name=Betty&type=dragon&birthDate=2015/02/12").unwrap();
        let mut errors = FieldErrors::default();
        let pet = form.apply(Pet::default(), &types(), &mut errors);
        assert_eq!(errors.get("birthDate"), Some(Message::InvalidDate));
        assert_eq!(errors.get("type"), Some(Message::UnknownPetType));
        assert!(pet.pet_type.is_none());
    }

    #[test]
    fn visit_form_defaults_date() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 10).unwrap();
        let form: VisitForm = serde_urlencoded::from_str("name=George&description=Visit%20Description").unwrap();
        let mut errors = FieldErrors::default();
        let visit = form.apply(
            Visit {
                id: None,
                date: today,
                description: String::new(),
            },
            &mut errors,
        );
        assert!(errors.is_empty());
        assert_eq!(visit.date, today);
        assert_eq!(visit.description, "Visit Description");
    }
}
