//! PetClinic: owners, pets, visits and vets behind server-rendered pages and a small JSON API.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod i18n;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;
pub mod views;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use repository::{Datastore, MemoryStore, PgStore};
pub use routes::{app, clinic_routes, common_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, seed_if_empty};
