//! PetClinic server.
//!
//! With `DATABASE_URL` set the clinic runs on PostgreSQL (database, schema and seed data are
//! created when missing); without it, on the seeded in-memory store.
//!
//! Run from repo root: `cargo run -p petclinic-server`

use petclinic::{app, ensure_database_exists, ensure_schema, seed_if_empty, AppState, MemoryStore, PgStore, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("petclinic=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let bind_addr = settings.bind_addr;

    let state = match settings.database_url.clone() {
        Some(database_url) => {
            ensure_database_exists(&database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&database_url)
                .await?;
            ensure_schema(&pool).await?;
            if settings.seed_data && seed_if_empty(&pool).await? {
                tracing::info!("seeded empty database");
            }
            AppState::new(PgStore::new(pool), settings)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            let store = if settings.seed_data {
                MemoryStore::seeded()
            } else {
                MemoryStore::new()
            };
            AppState::new(store, settings)
        }
    };

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("PetClinic listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
