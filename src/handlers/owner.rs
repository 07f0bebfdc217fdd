//! Owner handlers: create, find, show, update.

use crate::error::AppError;
use crate::extractors::RequestLocale;
use crate::i18n::Message;
use crate::model::{Owner, PageRequest};
use crate::response::{found, render};
use crate::service::{FieldErrors, FormValidator, OwnerForm};
use crate::state::AppState;
use crate::views::{FindOwnersPage, OwnerDetailsPage, OwnerFormPage, OwnersPage, Pager};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindParams {
    pub page: Option<u32>,
    pub last_name: Option<String>,
}

pub(crate) async fn load_owner(state: &AppState, owner_id: i32) -> Result<Owner, AppError> {
    state
        .store
        .find_owner(owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Owner not found with id: {}", owner_id)))
}

pub async fn init_creation_form(RequestLocale(locale): RequestLocale) -> Result<Response, AppError> {
    let page = OwnerFormPage::new(&Owner::default(), &FieldErrors::default(), locale);
    Ok(render(&page)?.into_response())
}

pub async fn process_creation_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Form(form): Form<OwnerForm>,
) -> Result<Response, AppError> {
    let mut owner = form.apply(Owner::default());
    let errors = FormValidator::owner(&owner);
    if !errors.is_empty() {
        return Ok(render(&OwnerFormPage::new(&owner, &errors, locale))?.into_response());
    }
    state.store.save_owner(&mut owner).await?;
    let owner_id = owner.id.unwrap_or_default();
    tracing::info!(owner_id, "owner created");
    Ok(found(format!("/owners/{}", owner_id)))
}

pub async fn init_find_form() -> Result<Response, AppError> {
    let page = FindOwnersPage {
        last_name: String::new(),
        error: String::new(),
    };
    Ok(render(&page)?.into_response())
}

/// Zero matches re-shows the search form, one match goes straight to the owner, more are listed.
pub async fn process_find_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Query(params): Query<FindParams>,
) -> Result<Response, AppError> {
    let last_name = params.last_name.unwrap_or_default().trim().to_string();
    let request = PageRequest::new(params.page.unwrap_or(1), state.settings.page_size);
    let mut results = state.store.find_owners_by_last_name(&last_name, request).await?;

    if results.total_items == 0 {
        let page = FindOwnersPage {
            last_name,
            error: locale.text(Message::NotFound).to_string(),
        };
        return Ok(render(&page)?.into_response());
    }
    if results.total_items == 1 {
        if results.items.is_empty() {
            // page past the end; the single match lives on page one
            results = state
                .store
                .find_owners_by_last_name(&last_name, PageRequest::new(1, state.settings.page_size))
                .await?;
        }
        if let Some(owner_id) = results.items.first().and_then(|o| o.id) {
            return Ok(found(format!("/owners/{}", owner_id)));
        }
    }

    let params: Vec<(&str, &str)> = if last_name.is_empty() {
        Vec::new()
    } else {
        vec![("lastName", last_name.as_str())]
    };
    let pager = Pager::new(&results, "/owners", &params);
    let page = OwnersPage {
        owners: results.items,
        pager,
    };
    Ok(render(&page)?.into_response())
}

pub async fn show_owner(State(state): State<AppState>, Path(owner_id): Path<i32>) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    Ok(render(&OwnerDetailsPage { owner_id, owner })?.into_response())
}

pub async fn init_update_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(owner_id): Path<i32>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    Ok(render(&OwnerFormPage::new(&owner, &FieldErrors::default(), locale))?.into_response())
}

pub async fn process_update_form(
    State(state): State<AppState>,
    RequestLocale(locale): RequestLocale,
    Path(owner_id): Path<i32>,
    Form(form): Form<OwnerForm>,
) -> Result<Response, AppError> {
    let existing = load_owner(&state, owner_id).await?;
    if !form.id_matches(owner_id) {
        let mut errors = FieldErrors::default();
        errors.reject("id", Message::OwnerIdMismatch);
        return Ok(render(&OwnerFormPage::new(&existing, &errors, locale))?.into_response());
    }

    let mut owner = form.apply(existing);
    let errors = FormValidator::owner(&owner);
    if !errors.is_empty() {
        return Ok(render(&OwnerFormPage::new(&owner, &errors, locale))?.into_response());
    }
    state.store.save_owner(&mut owner).await?;
    tracing::info!(owner_id, "owner updated");
    Ok(found(format!("/owners/{}", owner_id)))
}
