use serde::{Deserialize, Serialize};

use super::{RestaurantId, ZoneId};

/// A restaurant eligible for recommendation, tagged with the zone it sits in.
///
/// The candidate pool is loaded once per run from the latest warehouse
/// partition and shared read-only across every user in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub id: RestaurantId,
    pub zone_id: ZoneId,
}

impl Candidate {
    pub fn new(id: RestaurantId, zone_id: ZoneId) -> Self {
        Self { id, zone_id }
    }
}

/// A restaurant catalog entry with its display name, used by the SMS flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: RestaurantId,
    pub name: String,
}
