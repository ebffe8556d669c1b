use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod candidate;
pub mod recommendation;
pub mod user;

pub use candidate::{Candidate, RestaurantRecord};
pub use recommendation::Recommendation;
pub use user::{SmsUserRow, UserContext, UserRow};

/// Warehouse identifier for a restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub i64);

impl Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Warehouse identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Abstract grouping key used to stratify candidates relative to a user's
/// home location. The same type covers neighborhood and zipcode groupings;
/// which one a run uses is decided by the configured zone scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub i64);

impl Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Labeled impression row used to fit ranking models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub restaurant_id: RestaurantId,
    /// 1 for a positive engagement (e.g. a like), 0 otherwise
    pub label: i64,
}

/// A single SMS recommendation pick, timestamped at selection time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsPick {
    pub ts: DateTime<Utc>,
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub name: String,
}
