use rand::Rng;

use crate::error::AppResult;
use crate::models::{Candidate, Recommendation, UserContext};

use super::{partition_by_zone, QuotaConfig, QuotaSampler};

/// Produces one recommendation list per user from the shared candidate pool.
///
/// Each user is handled independently: exclusion filtering, zone partition,
/// stratified draw with backfill, then a final shuffle. The quota invariant
/// is checked up front so a bad configuration fails before any user is
/// touched. Supply shortfalls surface as shorter lists, never as errors.
pub fn generate_recommendations<R: Rng + ?Sized>(
    users: &[UserContext],
    pool: &[Candidate],
    config: QuotaConfig,
    rng: &mut R,
) -> AppResult<Vec<Recommendation>> {
    config.validate()?;

    let sampler = QuotaSampler::new(config);
    let mut recommendations = Vec::with_capacity(users.len());

    for user in users {
        let partition = partition_by_zone(pool, &user.excluded_ids, user.home_zone_id);
        let eligible = partition.eligible();
        let restaurant_ids =
            sampler.draw(&partition.home, &partition.other, &eligible, &mut *rng);
        recommendations.push(Recommendation::new(user.user_id, restaurant_ids));
    }

    Ok(recommendations)
}
