//! Field-scoped validation of submitted entities. Every failing field is reported, first
//! message per field wins.

use crate::i18n::{Locale, Message};
use crate::model::{Owner, Pet, Visit};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn telephone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("static telephone pattern"))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Message>,
}

impl FieldErrors {
    pub fn reject(&mut self, field: &'static str, message: Message) {
        self.errors.entry(field).or_insert(message);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<Message> {
        self.errors.get(field).copied()
    }

    /// Localized message for `field`, empty when the field is valid.
    pub fn text(&self, field: &str, locale: Locale) -> String {
        self.get(field).map(|m| locale.text(m).to_string()).unwrap_or_default()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.errors {
            self.reject(field, message);
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub struct FormValidator;

impl FormValidator {
    pub fn owner(owner: &Owner) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for (field, value) in [
            ("lastName", &owner.last_name),
            ("address", &owner.address),
            ("city", &owner.city),
            ("telephone", &owner.telephone),
        ] {
            if blank(value) {
                errors.reject(field, Message::Required);
            }
        }
        if !blank(&owner.telephone) && !telephone_pattern().is_match(owner.telephone.trim()) {
            errors.reject("telephone", Message::TelephoneDigits);
        }
        errors
    }

    /// `owner` is the stored owner the pet is being added to or edited under.
    pub fn pet(owner: &Owner, pet: &Pet, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if blank(&pet.name) {
            errors.reject("name", Message::Required);
        } else if let Some(existing) = owner.pet_named(pet.name.trim()) {
            if pet.id.is_none() || existing.id != pet.id {
                errors.reject("name", Message::Duplicate);
            }
        }
        if pet.pet_type.is_none() {
            errors.reject("type", Message::Required);
        }
        if let Some(birth_date) = pet.birth_date {
            if birth_date > today {
                errors.reject("birthDate", Message::FutureDate);
            }
        }
        errors
    }

    pub fn visit(visit: &Visit) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if blank(&visit.description) {
            errors.reject("description", Message::Required);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PetType;

    fn owner() -> Owner {
        Owner {
            id: Some(1),
            first_name: "George".into(),
            last_name: "Franklin".into(),
            address: "110 W. Liberty St.".into(),
            city: "Madison".into(),
            telephone: "6085551023".into(),
            pets: vec![Pet {
                id: Some(1),
                name: "Leo".into(),
                ..Pet::default()
            }],
        }
    }

    fn hamster(id: Option<i32>, name: &str) -> Pet {
        Pet {
            id,
            name: name.into(),
            pet_type: Some(PetType {
                id: 6,
                name: "hamster".into(),
            }),
            ..Pet::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn valid_owner_has_no_errors() {
        assert!(FormValidator::owner(&owner()).is_empty());
    }

    #[test]
    fn owner_reports_every_missing_field() {
        let mut o = owner();
        o.address.clear();
        o.telephone = "  ".into();
        let errors = FormValidator::owner(&o);
        assert_eq!(errors.get("address"), Some(Message::Required));
        assert_eq!(errors.get("telephone"), Some(Message::Required));
        assert!(!errors.has("city"));
    }

    #[test]
    fn telephone_must_be_ten_digits() {
        let mut o = owner();
        o.telephone = "608-555-1023".into();
        assert_eq!(FormValidator::owner(&o).get("telephone"), Some(Message::TelephoneDigits));
    }

    #[test]
    fn duplicate_pet_name_rejected_for_new_pet() {
        let errors = FormValidator::pet(&owner(), &hamster(None, "leo"), today());
        assert_eq!(errors.get("name"), Some(Message::Duplicate));
    }

    #[test]
    fn editing_pet_keeps_its_own_name() {
        assert!(FormValidator::pet(&owner(), &hamster(Some(1), "Leo"), today()).is_empty());
        let errors = FormValidator::pet(&owner(), &hamster(Some(2), "Leo"), today());
        assert!(errors.has("name"));
    }

    #[test]
    fn pet_type_required_and_birth_date_not_future() {
        let mut pet = hamster(None, "Betty");
        pet.pet_type = None;
        pet.birth_date = NaiveDate::from_ymd_opt(2030, 1, 1);
        let errors = FormValidator::pet(&owner(), &pet, today());
        assert_eq!(errors.get("type"), Some(Message::Required));
        assert_eq!(errors.get("birthDate"), Some(Message::FutureDate));
    }

    #[test]
    fn visit_requires_description() {
        let visit = Visit {
            id: None,
            date: today(),
            description: String::new(),
        };
        assert!(FormValidator::visit(&visit).has("description"));
    }

    #[test]
    fn first_rejection_wins() {
        let mut errors = FieldErrors::default();
        errors.reject("birthDate", Message::InvalidDate);
        errors.reject("birthDate", Message::FutureDate);
        assert_eq!(errors.text("birthDate", Locale::En), "invalid date");
        assert_eq!(errors.text("name", Locale::En), "");
    }
}
