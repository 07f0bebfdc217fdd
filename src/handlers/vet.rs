//! Vet listing: a paginated HTML page, or the whole list as JSON.

use crate::error::AppError;
use crate::extractors::Accept;
use crate::model::{PageRequest, Vets};
use crate::repository::VetRepository;
use crate::response::render;
use crate::state::AppState;
use crate::views::{Pager, VetsPage};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
}

pub async fn show_vet_list(
    State(state): State<AppState>,
    accept: Accept,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    if accept.prefers_json() {
        let vets = state.vets.find_vets().await?;
        return Ok(Json(Vets::new(&vets)).into_response());
    }
    show_vet_page(State(state), Query(params)).await
}

pub async fn show_vet_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let request = PageRequest::new(params.page.unwrap_or(1), state.settings.page_size);
    let page = state.vets.find_vets_page(request).await?;
    let pager = Pager::new(&page, "/vets.html", &[]);
    Ok(render(&VetsPage { vets: page.items, pager })?.into_response())
}
