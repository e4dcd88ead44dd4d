//! Database bootstrap: create the database if missing, then the customers schema, table and indexes.

use crate::error::{AppError, ConfigError};
use crate::customer::limits;
use crate::sql::{qualified_table, quoted, CUSTOMERS_TABLE};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Name of the unique index on email. A violation of it is reported as a conflict.
pub const EMAIL_UNIQUE_INDEX: &str = "customers_email_key";

/// Create schema, table and indexes. Idempotent (IF NOT EXISTS everywhere).
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let table = qualified_table(schema, CUSTOMERS_TABLE);
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id BIGSERIAL PRIMARY KEY,
            firstname VARCHAR({firstname}) NOT NULL,
            lastname VARCHAR({lastname}) NOT NULL,
            email VARCHAR({email}) NOT NULL,
            phone VARCHAR({phone}) NOT NULL,
            street_line1 VARCHAR({street}) NOT NULL,
            street_line2 VARCHAR({street}) NOT NULL,
            city VARCHAR({city}) NOT NULL,
            state VARCHAR({state}) NOT NULL,
            country VARCHAR({country}) NOT NULL,
            zipcode VARCHAR({zipcode}) NOT NULL,
            acc_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT customers_updated_after_created CHECK (updated_at >= created_at)
        )
        "#,
        table = table,
        firstname = limits::FIRSTNAME,
        lastname = limits::LASTNAME,
        email = limits::EMAIL,
        phone = limits::PHONE,
        street = limits::STREET_LINE,
        city = limits::CITY,
        state = limits::STATE,
        country = limits::COUNTRY,
        zipcode = limits::ZIPCODE,
    );
    sqlx::query(&ddl).execute(pool).await?;

    sqlx::query(&format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} (email)",
        quoted(EMAIL_UNIQUE_INDEX),
        table
    ))
    .execute(pool)
    .await?;

    for col in ["firstname", "lastname", "city"] {
        let index = format!("customers_{}_idx", col);
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            quoted(&index),
            table,
            quoted(col)
        ))
        .execute(pool)
        .await?;
    }
    tracing::info!(%table, "customers schema ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = connect_options(database_url)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn: sqlx::PgConnection = opts.database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn connect_options(database_url: &str) -> Result<PgConnectOptions, AppError> {
    PgConnectOptions::from_str(database_url).map_err(|e| {
        ConfigError::Invalid {
            key: "DATABASE_URL",
            message: e.to_string(),
        }
        .into()
    })
}
