//! Page models rendered through askama templates under `templates/`.

use crate::i18n::Locale;
use crate::model::{Owner, Page, Pet, Vet};
use crate::service::FieldErrors;
use askama::Template;

pub struct InputField {
    pub label: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub value: String,
    pub error: String,
}

impl InputField {
    fn new(label: &'static str, name: &'static str, value: impl Into<String>, errors: &FieldErrors, locale: Locale) -> Self {
        InputField {
            label,
            name,
            kind: "text",
            value: value.into(),
            error: errors.text(name, locale),
        }
    }

    fn date(mut self) -> Self {
        self.kind = "date";
        self
    }
}

pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

pub struct SelectField {
    pub label: &'static str,
    pub name: &'static str,
    pub options: Vec<SelectOption>,
    pub error: String,
}

pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

pub struct Pager {
    pub current: u32,
    pub total_pages: u32,
    pub links: Vec<PageLink>,
}

impl Pager {
    /// Links to every page of `page`, carrying `params` alongside `page=N`.
    pub fn new<T>(page: &Page<T>, base: &str, params: &[(&str, &str)]) -> Self {
        let current = page.request.number;
        let total_pages = page.total_pages();
        let links = (1..=total_pages)
            .map(|number| {
                let number_text = number.to_string();
                let mut query: Vec<(&str, &str)> = vec![("page", number_text.as_str())];
                query.extend_from_slice(params);
                let encoded = serde_urlencoded::to_string(&query).unwrap_or_else(|_| format!("page={}", number));
                PageLink {
                    number,
                    href: format!("{}?{}", base, encoded),
                    current: number == current,
                }
            })
            .collect();
        Pager {
            current,
            total_pages,
            links,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}

#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomePage;

#[derive(Template)]
#[template(path = "owners/find.html")]
pub struct FindOwnersPage {
    pub last_name: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "owners/list.html")]
pub struct OwnersPage {
    pub owners: Vec<Owner>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "owners/form.html")]
pub struct OwnerFormPage {
    pub is_new: bool,
    pub fields: Vec<InputField>,
    pub form_error: String,
}

impl OwnerFormPage {
    pub fn new(owner: &Owner, errors: &FieldErrors, locale: Locale) -> Self {
        OwnerFormPage {
            is_new: owner.id.is_none(),
            fields: vec![
                InputField::new("First Name", "firstName", owner.first_name.as_str(), errors, locale),
                InputField::new("Last Name", "lastName", owner.last_name.as_str(), errors, locale),
                InputField::new("Address", "address", owner.address.as_str(), errors, locale),
                InputField::new("City", "city", owner.city.as_str(), errors, locale),
                InputField::new("Telephone", "telephone", owner.telephone.as_str(), errors, locale),
            ],
            form_error: errors.text("id", locale),
        }
    }
}

#[derive(Template)]
#[template(path = "owners/details.html")]
pub struct OwnerDetailsPage {
    pub owner_id: i32,
    pub owner: Owner,
}

#[derive(Template)]
#[template(path = "pets/form.html")]
pub struct PetFormPage {
    pub is_new: bool,
    pub owner_name: String,
    pub fields: Vec<InputField>,
    pub type_field: SelectField,
}

impl PetFormPage {
    pub fn new(owner: &Owner, pet: &Pet, type_names: Vec<String>, errors: &FieldErrors, locale: Locale) -> Self {
        PetFormPage {
            is_new: pet.id.is_none(),
            owner_name: owner.full_name(),
            fields: vec![
                InputField::new("Name", "name", pet.name.as_str(), errors, locale),
                InputField::new("Birth Date", "birthDate", pet.birth_date_label(), errors, locale).date(),
            ],
            type_field: SelectField {
                label: "Type",
                name: "type",
                options: type_names
                    .into_iter()
                    .map(|value| SelectOption {
                        selected: value == pet.type_name(),
                        value,
                    })
                    .collect(),
                error: errors.text("type", locale),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "pets/visit_form.html")]
pub struct VisitFormPage {
    pub owner_name: String,
    pub pet: Pet,
    pub fields: Vec<InputField>,
}

impl VisitFormPage {
    pub fn new(owner: &Owner, pet: Pet, date: String, description: String, errors: &FieldErrors, locale: Locale) -> Self {
        VisitFormPage {
            owner_name: owner.full_name(),
            fields: vec![
                InputField::new("Date", "date", date, errors, locale).date(),
                InputField::new("Description", "description", description, errors, locale),
            ],
            pet,
        }
    }
}

#[derive(Template)]
#[template(path = "vets/list.html")]
pub struct VetsPage {
    pub vets: Vec<Vet>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}
