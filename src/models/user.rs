use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::{RestaurantId, UserId, ZoneId};

/// Raw user row as the warehouse hands it over.
///
/// The home zone can be absent for users that never resolved to a zone
/// (new signups, users outside the coverage area). Such rows are reported
/// and skipped by the run loop rather than aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub user_id: UserId,
    pub home_zone_id: Option<ZoneId>,
    /// Restaurants shown to this user within the impression window
    pub seen_restaurant_ids: Vec<RestaurantId>,
}

impl UserRow {
    /// Validates the row into a sampling-ready context.
    ///
    /// The seen list collapses into a set; duplicate impressions upstream
    /// are expected and harmless.
    pub fn into_context(self) -> AppResult<UserContext> {
        let home_zone_id = self.home_zone_id.ok_or_else(|| {
            AppError::UpstreamData(format!("user {} has no home zone", self.user_id))
        })?;

        Ok(UserContext {
            user_id: self.user_id,
            home_zone_id,
            excluded_ids: self.seen_restaurant_ids.into_iter().collect(),
        })
    }
}

/// Audience row for the SMS channel: a user plus everything already sent
/// to them over that channel. No zone; the SMS pick is unstratified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsUserRow {
    pub user_id: UserId,
    pub sent_restaurant_ids: Vec<RestaurantId>,
}

/// Per-user input to the sampling engine
#[derive(Debug, Clone, PartialEq)]
pub struct UserContext {
    pub user_id: UserId,
    pub home_zone_id: ZoneId,
    /// Items already shown within the recency window; authoritative,
    /// computed by the user source
    pub excluded_ids: HashSet<RestaurantId>,
}
