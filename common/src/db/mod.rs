//! Database bootstrap: pool construction and schema setup

use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres};
use tracing::info;

use crate::error::Result;

/// Database pool type
pub type DbPool = Pool<Postgres>;

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    info!("Connecting to PostgreSQL database with pool size: {}", max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Connected to PostgreSQL database");
    Ok(pool)
}

/// Create the account table if it does not exist yet
///
/// `number` and `balance` are serial columns, so both are filled from their
/// own sequences on insert.
pub async fn create_account_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS account (
            id BIGSERIAL PRIMARY KEY,
            first_name VARCHAR(50),
            last_name VARCHAR(50),
            number BIGSERIAL,
            balance BIGSERIAL,
            created_at TIMESTAMPTZ
        )"
    )
    .execute(pool)
    .await?;

    Ok(())
}
