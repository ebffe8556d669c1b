use sqlx::PgPool;

use crate::error::AppResult;

/// DDL for the tables this service owns. Feature and dimension tables are
/// managed by the warehouse transformation layer and are not created here.
const OWNED_TABLES: &[&str] = &[
    "create table if not exists user_daily_recs (
        ds date not null,
        user_id bigint not null,
        restaurant_ids bigint[] not null,
        model_type text not null,
        model_id bigint not null
    )",
    "create index if not exists user_daily_recs_ds_idx on user_daily_recs (ds)",
    "create table if not exists sms_daily_recs (
        ts timestamptz not null,
        user_id bigint not null,
        restaurant_id bigint not null,
        name text not null
    )",
    "create table if not exists model_store (
        model_type text not null,
        trained_at timestamptz not null,
        artifact jsonb not null
    )",
];

/// Creates the prediction and model tables if they do not exist.
///
/// Safe to run repeatedly; existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool) -> AppResult<()> {
    for ddl in OWNED_TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }

    tracing::info!(statements = OWNED_TABLES.len(), "Output tables ensured");
    Ok(())
}
