//! Clinic schema DDL, sample data seeding and database bootstrap.

use crate::error::AppError;
use crate::seed;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Tables in dependency order; every statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS vets (
        id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS vets_last_name ON vets (last_name)",
    r#"
    CREATE TABLE IF NOT EXISTS specialties (
        id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS specialties_name ON specialties (name)",
    r#"
    CREATE TABLE IF NOT EXISTS vet_specialties (
        vet_id INTEGER NOT NULL REFERENCES vets (id),
        specialty_id INTEGER NOT NULL REFERENCES specialties (id),
        PRIMARY KEY (vet_id, specialty_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS types (
        id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS types_name ON types (name)",
    r#"
    CREATE TABLE IF NOT EXISTS owners (
        id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL,
        address TEXT NOT NULL,
        city TEXT NOT NULL,
        telephone TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS owners_last_name ON owners (last_name)",
    r#"
    CREATE TABLE IF NOT EXISTS pets (
        id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        name TEXT NOT NULL,
        birth_date DATE,
        type_id INTEGER NOT NULL REFERENCES types (id),
        owner_id INTEGER NOT NULL REFERENCES owners (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS pets_owner_id ON pets (owner_id)",
    r#"
    CREATE TABLE IF NOT EXISTS visits (
        id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
        pet_id INTEGER NOT NULL REFERENCES pets (id),
        visit_date DATE NOT NULL,
        description TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS visits_pet_id ON visits (pet_id)",
];

const SEEDED_TABLES: &[&str] = &["vets", "specialties", "types", "owners", "pets", "visits"];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Loads the sample clinic when `owners` and `vets` are both empty. Returns whether it seeded.
pub async fn seed_if_empty(pool: &PgPool) -> Result<bool, AppError> {
    let (owners, vets): (i64, i64) =
        sqlx::query_as("SELECT (SELECT COUNT(*) FROM owners), (SELECT COUNT(*) FROM vets)")
            .fetch_one(pool)
            .await?;
    if owners > 0 || vets > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    for (id, first, last) in seed::VETS {
        sqlx::query("INSERT INTO vets (id, first_name, last_name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(first)
            .bind(last)
            .execute(&mut *tx)
            .await?;
    }
    for (id, name) in seed::SPECIALTIES {
        sqlx::query("INSERT INTO specialties (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }
    for (vet_id, specialty_id) in seed::VET_SPECIALTIES {
        sqlx::query("INSERT INTO vet_specialties (vet_id, specialty_id) VALUES ($1, $2)")
            .bind(vet_id)
            .bind(specialty_id)
            .execute(&mut *tx)
            .await?;
    }
    for (id, name) in seed::PET_TYPES {
        sqlx::query("INSERT INTO types (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }
    for (id, first, last, address, city, telephone) in seed::OWNERS {
        sqlx::query(
            "INSERT INTO owners (id, first_name, last_name, address, city, telephone) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(first)
        .bind(last)
        .bind(address)
        .bind(city)
        .bind(telephone)
        .execute(&mut *tx)
        .await?;
    }
    for (id, name, birth, type_id, owner_id) in seed::PETS {
        sqlx::query("INSERT INTO pets (id, name, birth_date, type_id, owner_id) VALUES ($1, $2, $3, $4, $5)")
            .bind(id)
            .bind(name)
            .bind(seed::date(birth))
            .bind(type_id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
    }
    for (id, pet_id, date, description) in seed::VISITS {
        sqlx::query("INSERT INTO visits (id, pet_id, visit_date, description) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(pet_id)
            .bind(seed::date(date))
            .bind(description)
            .execute(&mut *tx)
            .await?;
    }
    // Explicit ids bypass the identity sequences; move them past the seeded rows.
    for table in SEEDED_TABLES {
        let sql = format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
        );
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("seeded sample clinic data");
    Ok(true)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (path_and_query, None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(query) => format!("{}postgres?{}", base, query),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
