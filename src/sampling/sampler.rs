use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Candidate, RestaurantId};

use super::QuotaConfig;

/// Stratified quota draw over a partitioned candidate pool.
///
/// Draws up to the home-zone target from the home subset, fills the rest of
/// the quota from the other subset, backfills any remaining shortfall from
/// the whole eligible pool, and returns one random permutation of the
/// result. Supply shortfalls shrink the output instead of failing.
pub struct QuotaSampler {
    config: QuotaConfig,
}

impl QuotaSampler {
    pub fn new(config: QuotaConfig) -> Self {
        Self { config }
    }

    /// Draws a de-duplicated, randomly ordered selection of at most
    /// `config.total` ids.
    ///
    /// `eligible` is the union of `home` and `other` under normal use; the
    /// backfill stage re-checks drawn ids against it, so an overlapping
    /// caller pool still cannot produce duplicates.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        home: &[Candidate],
        other: &[Candidate],
        eligible: &[Candidate],
        rng: &mut R,
    ) -> Vec<RestaurantId> {
        let total = self.config.total;
        if total == 0 {
            return Vec::new();
        }

        // A short home zone is not an error, it just yields fewer home picks.
        let home_n = self.config.home_zone_target.min(total).min(home.len());
        let mut selection: Vec<RestaurantId> = home
            .choose_multiple(&mut *rng, home_n)
            .map(|c| c.id)
            .collect();

        // The other-zone target never shrinks below the share not reserved
        // for the home zone, so a sparse home zone is compensated for in
        // the same pass.
        let other_target = total
            .saturating_sub(selection.len())
            .max(total.saturating_sub(self.config.home_zone_target));
        let other_n = other_target.min(other.len());
        selection.extend(other.choose_multiple(&mut *rng, other_n).map(|c| c.id));

        // Backfill from whatever the zone draws left behind. The output can
        // still come up short when the whole eligible pool is smaller than
        // the quota; that is a valid outcome.
        if selection.len() < total {
            let shortfall = total - selection.len();
            let drawn: HashSet<RestaurantId> = selection.iter().copied().collect();
            let residual: Vec<RestaurantId> = eligible
                .iter()
                .map(|c| c.id)
                .filter(|id| !drawn.contains(id))
                .collect();
            selection.extend(
                residual
                    .choose_multiple(&mut *rng, shortfall.min(residual.len()))
                    .copied(),
            );
        }

        // One permutation at the end so position carries no signal about
        // which stage drew an id.
        selection.shuffle(&mut *rng);
        selection
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::models::ZoneId;

    use super::*;

    fn candidates(zone: i64, ids: std::ops::Range<i64>) -> Vec<Candidate> {
        ids.map(|id| Candidate::new(RestaurantId(id), ZoneId(zone)))
            .collect()
    }

    fn eligible_of(home: &[Candidate], other: &[Candidate]) -> Vec<Candidate> {
        home.iter().chain(other.iter()).copied().collect()
    }

    fn sampler(total: usize, home_target: usize) -> QuotaSampler {
        QuotaSampler::new(QuotaConfig::new(total, home_target).unwrap())
    }

    #[test]
    fn test_draw_respects_total_and_uniqueness() {
        let home = candidates(1, 0..20);
        let other = candidates(2, 100..120);
        let eligible = eligible_of(&home, &other);
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = sampler(4, 2).draw(&home, &other, &eligible, &mut rng);

        assert_eq!(drawn.len(), 4);
        let unique: HashSet<RestaurantId> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_home_quota_filled_when_supply_allows() {
        let home = candidates(1, 0..10);
        let other = candidates(2, 100..110);
        let eligible = eligible_of(&home, &other);
        let home_ids: HashSet<RestaurantId> = home.iter().map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let drawn = sampler(4, 2).draw(&home, &other, &eligible, &mut rng);
            let from_home = drawn.iter().filter(|id| home_ids.contains(id)).count();
            assert!(from_home >= 2, "expected >= 2 home picks, got {}", from_home);
        }
    }

    #[test]
    fn test_sparse_home_zone_compensated_from_other() {
        let home = candidates(1, 0..1);
        let other = candidates(2, 100..110);
        let eligible = eligible_of(&home, &other);
        let mut rng = StdRng::seed_from_u64(3);

        let drawn = sampler(4, 2).draw(&home, &other, &eligible, &mut rng);

        // One home pick, and the other draw stretches to cover the gap.
        assert_eq!(drawn.len(), 4);
        assert!(drawn.contains(&RestaurantId(0)));
    }

    #[test]
    fn test_backfill_recovers_from_exhausted_zones() {
        // Both zone subsets empty, three candidates reachable only through
        // the eligible pool: the draw returns all three, no error.
        let eligible = candidates(9, 0..3);
        let mut rng = StdRng::seed_from_u64(5);

        let drawn = sampler(5, 2).draw(&[], &[], &eligible, &mut rng);

        assert_eq!(drawn.len(), 3);
        let unique: HashSet<RestaurantId> = drawn.iter().copied().collect();
        let expected: HashSet<RestaurantId> = eligible.iter().map(|c| c.id).collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn test_backfill_draws_extra_home_when_other_is_short() {
        let home = candidates(1, 0..10);
        let other = candidates(2, 100..101);
        let eligible = eligible_of(&home, &other);
        let home_ids: HashSet<RestaurantId> = home.iter().map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(13);

        let drawn = sampler(4, 2).draw(&home, &other, &eligible, &mut rng);

        // 2 from home + 1 from other + 1 backfilled home pick.
        assert_eq!(drawn.len(), 4);
        let from_home = drawn.iter().filter(|id| home_ids.contains(id)).count();
        assert_eq!(from_home, 3);
        let unique: HashSet<RestaurantId> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_backfill_excludes_drawn_ids_on_overlapping_pool() {
        // Caller passes an eligible pool that repeats the other subset; the
        // backfill re-check keeps the output duplicate-free anyway.
        let other = candidates(2, 100..102);
        let mut eligible = other.clone();
        eligible.extend(other.clone());
        eligible.push(Candidate::new(RestaurantId(500), ZoneId(9)));
        let mut rng = StdRng::seed_from_u64(17);

        let drawn = sampler(5, 0).draw(&[], &other, &eligible, &mut rng);

        let unique: HashSet<RestaurantId> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), drawn.len());
        assert_eq!(unique.len(), 3);
        assert!(unique.contains(&RestaurantId(500)));
    }

    #[test]
    fn test_zero_total_returns_empty() {
        let home = candidates(1, 0..5);
        let other = candidates(2, 100..105);
        let eligible = eligible_of(&home, &other);
        let mut rng = StdRng::seed_from_u64(19);

        assert!(sampler(0, 0).draw(&home, &other, &eligible, &mut rng).is_empty());
    }

    #[test]
    fn test_empty_pool_returns_empty() {
        let mut rng = StdRng::seed_from_u64(23);
        assert!(sampler(4, 2).draw(&[], &[], &[], &mut rng).is_empty());
    }

    #[test]
    fn test_home_target_equal_to_total() {
        let home = candidates(1, 0..10);
        let other = candidates(2, 100..110);
        let eligible = eligible_of(&home, &other);
        let home_ids: HashSet<RestaurantId> = home.iter().map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(29);

        let drawn = sampler(3, 3).draw(&home, &other, &eligible, &mut rng);

        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|id| home_ids.contains(id)));
    }

    #[test]
    fn test_shuffle_spreads_home_picks_across_positions() {
        // With two fixed home picks and two other picks per draw, each home
        // id should land in every position roughly a quarter of the time.
        let home = candidates(1, 0..2);
        let other = candidates(2, 100..104);
        let eligible = eligible_of(&home, &other);
        let mut rng = StdRng::seed_from_u64(31);
        let s = sampler(4, 2);

        let iterations = 4000;
        let mut position_counts = [0usize; 4];
        for _ in 0..iterations {
            let drawn = s.draw(&home, &other, &eligible, &mut rng);
            assert_eq!(drawn.len(), 4);
            let pos = drawn
                .iter()
                .position(|id| *id == RestaurantId(0))
                .expect("home id 0 is always drawn");
            position_counts[pos] += 1;
        }

        let expected = iterations / 4;
        for (pos, count) in position_counts.iter().enumerate() {
            assert!(
                *count > expected / 2 && *count < expected * 2,
                "position {} saw {} placements, expected near {}",
                pos,
                count,
                expected
            );
        }
    }
}
