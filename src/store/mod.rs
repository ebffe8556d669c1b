//! Warehouse collaborator contracts.
//!
//! Every flow talks to the warehouse through these traits rather than a
//! shared client handle, so the run loops can be exercised against mocks
//! and the storage backend can change without touching selection logic.

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

use crate::error::AppResult;
use crate::models::{
    Candidate, Recommendation, RestaurantRecord, SmsPick, SmsUserRow, TrainingRow, UserRow,
};

pub mod postgres;
pub mod setup;

pub use postgres::{create_pool, WarehouseStore};

/// Supplies the current candidate pool, deduplicated and current as of the
/// latest warehouse partition.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn latest_candidates(&self) -> AppResult<Vec<Candidate>>;
}

/// Supplies the users to score, each with home zone and impression window.
/// Rows come back raw; per-record validation happens in the run loop so one
/// bad row never aborts the batch.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn latest_users(&self) -> AppResult<Vec<UserRow>>;
}

/// Accepts produced recommendations for durable storage, keyed by run date.
/// A date that already has output must be detected up front; writes are
/// append-only behind that check.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecommendationSink: Send + Sync {
    async fn has_output_for(&self, ds: NaiveDate) -> AppResult<bool>;

    async fn write(
        &self,
        ds: NaiveDate,
        recommendations: &[Recommendation],
        model_type: &str,
        model_id: i64,
    ) -> AppResult<()>;
}

/// Full restaurant catalog with display names, for channels that render a
/// single pick rather than an id list.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RestaurantCatalog: Send + Sync {
    async fn all_restaurants(&self) -> AppResult<Vec<RestaurantRecord>>;
}

/// Users reachable over the SMS channel plus their send history
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SmsAudienceSource: Send + Sync {
    async fn sms_users(&self) -> AppResult<Vec<SmsUserRow>>;
}

/// Accepts timestamped SMS picks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SmsSink: Send + Sync {
    async fn write_picks(&self, picks: &[SmsPick]) -> AppResult<()>;
}

/// Labeled impression rows over a date window, for model fitting
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TrainingSource: Send + Sync {
    async fn labeled_rows(&self, start_ds: NaiveDate, end_ds: NaiveDate)
        -> AppResult<Vec<TrainingRow>>;
}

/// Persists fitted model artifacts keyed by model type
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelStore: Send + Sync {
    async fn save_artifact(&self, model_type: &str, artifact: serde_json::Value) -> AppResult<()>;
}
