use serde::{Deserialize, Serialize};

use super::{RestaurantId, UserId};

/// One user's daily recommendation list.
///
/// The list carries no duplicates and is already randomly ordered; the
/// ordering is fixed at draw time and never re-shuffled downstream. A list
/// shorter than the configured quota means the user's eligible pool ran
/// out, which is a valid outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub user_id: UserId,
    pub restaurant_ids: Vec<RestaurantId>,
}

impl Recommendation {
    pub fn new(user_id: UserId, restaurant_ids: Vec<RestaurantId>) -> Self {
        Self {
            user_id,
            restaurant_ids,
        }
    }

    /// True when the draw came up short of the requested quota
    pub fn is_under_quota(&self, total: usize) -> bool {
        self.restaurant_ids.len() < total
    }
}
