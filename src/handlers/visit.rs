//! Visit booking for a pet.

use super::owner::load_owner;
use super::pet::find_pet;
use crate::error::AppError;
use crate::extractors::RequestLocale;
use crate::model::Visit;
use crate::response::{found, render};
use crate::service::{FieldErrors, FormValidator, VisitForm};
use crate::state::AppState;
use crate::views::VisitFormPage;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form,
};

fn new_visit() -> Visit {
    Visit {
        id: None,
        date: chrono::Local::now().date_naive(),
        description: String::new(),
    }
}

pub async fn init_new_visit_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = find_pet(&owner, pet_id)?;
    let visit = new_visit();
    let page = VisitFormPage::new(&owner, pet, visit.date_label(), visit.description, &FieldErrors::default(), locale);
    Ok(render(&page)?.into_response())
}

pub async fn process_new_visit_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Form(form): Form<VisitForm>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = find_pet(&owner, pet_id)?;

    let submitted_date = form.date.clone().filter(|d| !d.trim().is_empty());
    let mut errors = FieldErrors::default();
    let mut visit = form.apply(new_visit(), &mut errors);
    errors.merge(FormValidator::visit(&visit));
    if !errors.is_empty() {
        let date = submitted_date.unwrap_or_else(|| visit.date_label());
        let page = VisitFormPage::new(&owner, pet, date, visit.description, &errors, locale);
        return Ok(render(&page)?.into_response());
    }

    state.store.save_visit(pet_id, &mut visit).await?;
    tracing::info!(owner_id, pet_id, visit_id = visit.id.unwrap_or_default(), "visit booked");
    Ok(found(format!("/owners/{}", owner_id)))
}
