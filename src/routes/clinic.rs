//! Clinic pages and the vets API.

use crate::handlers::{crash, owner, pet, vet, visit, welcome};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn clinic_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome::welcome))
        .route("/owners/new", get(owner::init_creation_form).post(owner::process_creation_form))
        .route("/owners/find", get(owner::init_find_form))
        .route("/owners", get(owner::process_find_form))
        .route("/owners/:owner_id", get(owner::show_owner))
        .route(
            "/owners/:owner_id/edit",
            get(owner::init_update_form).post(owner::process_update_form),
        )
        .route(
            "/owners/:owner_id/pets/new",
            get(pet::init_creation_form).post(pet::process_creation_form),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/edit",
            get(pet::init_update_form).post(pet::process_update_form),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/visits/new",
            get(visit::init_new_visit_form).post(visit::process_new_visit_form),
        )
        .route("/vets", get(vet::show_vet_list))
        .route("/vets.html", get(vet::show_vet_page))
        .route("/oups", get(crash::trigger_exception))
        .with_state(state)
}
