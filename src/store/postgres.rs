use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::config::ZoneScheme;
use crate::error::AppResult;
use crate::models::{
    Candidate, Recommendation, RestaurantId, RestaurantRecord, SmsPick, SmsUserRow, TrainingRow,
    UserId, UserRow, ZoneId,
};

use super::{
    CandidateSource, ModelStore, RecommendationSink, RestaurantCatalog, SmsAudienceSource,
    SmsSink, TrainingSource, UserSource,
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Postgres-backed implementation of every warehouse contract.
///
/// Feature tables are partitioned by `ds`; reads always target the latest
/// partition. The zone scheme fixed at construction decides which zone
/// columns the feature queries select, so neighborhood and zipcode runs
/// share all of this code.
pub struct WarehouseStore {
    pool: PgPool,
    scheme: ZoneScheme,
}

impl WarehouseStore {
    pub fn new(pool: PgPool, scheme: ZoneScheme) -> Self {
        Self { pool, scheme }
    }
}

#[async_trait]
impl CandidateSource for WarehouseStore {
    async fn latest_candidates(&self) -> AppResult<Vec<Candidate>> {
        // Zone column names come from the scheme enum, never from input.
        let sql = format!(
            "select restaurant_id, {zone} as zone_id \
             from restaurant_sparse_features \
             where ds = (select max(ds) from restaurant_sparse_features) \
               and {zone} is not null",
            zone = self.scheme.restaurant_zone_column()
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                Ok(Candidate {
                    id: RestaurantId(row.try_get("restaurant_id")?),
                    zone_id: ZoneId(row.try_get("zone_id")?),
                })
            })
            .collect()
    }
}

#[async_trait]
impl UserSource for WarehouseStore {
    async fn latest_users(&self) -> AppResult<Vec<UserRow>> {
        let sql = format!(
            "select user_id, {zone} as home_zone_id, seen_restaurant_ids \
             from user_sparse_features \
             where ds = (select max(ds) from user_sparse_features)",
            zone = self.scheme.user_zone_column()
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                let seen: Option<Vec<i64>> = row.try_get("seen_restaurant_ids")?;
                Ok(UserRow {
                    user_id: UserId(row.try_get("user_id")?),
                    home_zone_id: row
                        .try_get::<Option<i64>, _>("home_zone_id")?
                        .map(ZoneId),
                    seen_restaurant_ids: seen
                        .unwrap_or_default()
                        .into_iter()
                        .map(RestaurantId)
                        .collect(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl RecommendationSink for WarehouseStore {
    async fn has_output_for(&self, ds: NaiveDate) -> AppResult<bool> {
        let row = sqlx::query("select exists(select 1 from user_daily_recs where ds = $1)")
            .bind(ds)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get(0)?)
    }

    async fn write(
        &self,
        ds: NaiveDate,
        recommendations: &[Recommendation],
        model_type: &str,
        model_id: i64,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        for rec in recommendations {
            let ids: Vec<i64> = rec.restaurant_ids.iter().map(|id| id.0).collect();
            sqlx::query(
                "insert into user_daily_recs (ds, user_id, restaurant_ids, model_type, model_id) \
                 values ($1, $2, $3, $4, $5)",
            )
            .bind(ds)
            .bind(rec.user_id.0)
            .bind(&ids)
            .bind(model_type)
            .bind(model_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl RestaurantCatalog for WarehouseStore {
    async fn all_restaurants(&self) -> AppResult<Vec<RestaurantRecord>> {
        let rows = sqlx::query("select id, name from dim_restaurant")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(RestaurantRecord {
                    id: RestaurantId(row.try_get("id")?),
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl SmsAudienceSource for WarehouseStore {
    async fn sms_users(&self) -> AppResult<Vec<SmsUserRow>> {
        let rows = sqlx::query("select user_id, sent_restaurant_ids from sms_engagement_features")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let sent: Option<Vec<i64>> = row.try_get("sent_restaurant_ids")?;
                Ok(SmsUserRow {
                    user_id: UserId(row.try_get("user_id")?),
                    sent_restaurant_ids: sent
                        .unwrap_or_default()
                        .into_iter()
                        .map(RestaurantId)
                        .collect(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl SmsSink for WarehouseStore {
    async fn write_picks(&self, picks: &[SmsPick]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        for pick in picks {
            sqlx::query(
                "insert into sms_daily_recs (ts, user_id, restaurant_id, name) \
                 values ($1, $2, $3, $4)",
            )
            .bind(pick.ts)
            .bind(pick.user_id.0)
            .bind(pick.restaurant_id.0)
            .bind(&pick.name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl TrainingSource for WarehouseStore {
    async fn labeled_rows(
        &self,
        start_ds: NaiveDate,
        end_ds: NaiveDate,
    ) -> AppResult<Vec<TrainingRow>> {
        let rows =
            sqlx::query("select restaurant_id, label from training_labels where ds >= $1 and ds <= $2")
                .bind(start_ds)
                .bind(end_ds)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| {
                Ok(TrainingRow {
                    restaurant_id: RestaurantId(row.try_get("restaurant_id")?),
                    label: row.try_get("label")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ModelStore for WarehouseStore {
    async fn save_artifact(&self, model_type: &str, artifact: serde_json::Value) -> AppResult<()> {
        sqlx::query("insert into model_store (model_type, trained_at, artifact) values ($1, $2, $3)")
            .bind(model_type)
            .bind(Utc::now())
            .bind(artifact)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
