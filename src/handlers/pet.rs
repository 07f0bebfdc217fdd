//! Pet handlers, nested under an owner.

use super::owner::load_owner;
use crate::error::AppError;
use crate::extractors::RequestLocale;
use crate::i18n::Locale;
use crate::model::{Owner, Pet, PetType};
use crate::response::{found, render};
use crate::service::{FieldErrors, FormValidator, PetForm};
use crate::state::AppState;
use crate::views::PetFormPage;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};

pub(crate) fn find_pet(owner: &Owner, pet_id: i32) -> Result<Pet, AppError> {
    owner
        .pet(pet_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Pet not found with id: {}", pet_id)))
}

fn type_names(types: &[PetType]) -> Vec<String> {
    types.iter().map(|t| t.name.clone()).collect()
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub async fn init_creation_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(owner_id): Path<i32>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let types = state.store.find_pet_types().await?;
    let page = PetFormPage::new(&owner, &Pet::default(), type_names(&types), &FieldErrors::default(), locale);
    Ok(render(&page)?.into_response())
}

pub async fn process_creation_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(owner_id): Path<i32>,
    Form(form): Form<PetForm>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    save_or_reshow(&state, locale, owner, Pet::default(), form).await
}

pub async fn init_update_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = find_pet(&owner, pet_id)?;
    let types = state.store.find_pet_types().await?;
    let page = PetFormPage::new(&owner, &pet, type_names(&types), &FieldErrors::default(), locale);
    Ok(render(&page)?.into_response())
}

pub async fn process_update_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Form(form): Form<PetForm>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = find_pet(&owner, pet_id)?;
    save_or_reshow(&state, locale, owner, pet, form).await
}

async fn save_or_reshow(
    state: &AppState,
    locale: Locale,
    owner: Owner,
    base: Pet,
    form: PetForm,
) -> Result<Response, AppError> {
    let types = state.store.find_pet_types().await?;
    let mut errors = FieldErrors::default();
    let mut pet = form.apply(base, &types, &mut errors);
    errors.merge(FormValidator::pet(&owner, &pet, today()));
    if !errors.is_empty() {
        let page = PetFormPage::new(&owner, &pet, type_names(&types), &errors, locale);
        return Ok(render(&page)?.into_response());
    }

    let owner_id = owner.id.unwrap_or_default();
    let is_new = pet.id.is_none();
    state.store.save_pet(owner_id, &mut pet).await?;
    tracing::info!(owner_id, pet_id = pet.id.unwrap_or_default(), is_new, "pet saved");
    Ok(found(format!("/owners/{}", owner_id)))
}
