use std::collections::HashSet;

use crate::models::{Candidate, RestaurantId, ZoneId};

/// An eligible candidate pool split relative to one user's home zone.
///
/// `home` and `other` are disjoint and their union is exactly the pool
/// minus the user's exclusions.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePartition {
    pub home: Vec<Candidate>,
    pub other: Vec<Candidate>,
}

impl ZonePartition {
    /// Number of candidates the user is still eligible to see
    pub fn eligible_len(&self) -> usize {
        self.home.len() + self.other.len()
    }

    /// The whole eligible pool, home zone first. Feeds the backfill stage.
    pub fn eligible(&self) -> Vec<Candidate> {
        self.home.iter().chain(self.other.iter()).copied().collect()
    }
}

/// Drops excluded candidates, then splits what remains by home zone.
///
/// Exclusion happens once here, upstream of all stratification, so neither
/// subset can carry an already-seen id. Pure function of its inputs; the
/// randomness lives entirely in the sampler.
pub fn partition_by_zone(
    pool: &[Candidate],
    excluded_ids: &HashSet<RestaurantId>,
    home_zone_id: ZoneId,
) -> ZonePartition {
    let mut home = Vec::new();
    let mut other = Vec::new();

    for candidate in pool {
        if excluded_ids.contains(&candidate.id) {
            continue;
        }
        if candidate.zone_id == home_zone_id {
            home.push(*candidate);
        } else {
            other.push(*candidate);
        }
    }

    ZonePartition { home, other }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<Candidate> {
        vec![
            Candidate::new(RestaurantId(1), ZoneId(10)),
            Candidate::new(RestaurantId(2), ZoneId(10)),
            Candidate::new(RestaurantId(3), ZoneId(20)),
            Candidate::new(RestaurantId(4), ZoneId(30)),
        ]
    }

    #[test]
    fn test_partition_splits_by_home_zone() {
        let partition = partition_by_zone(&pool(), &HashSet::new(), ZoneId(10));

        let home_ids: Vec<RestaurantId> = partition.home.iter().map(|c| c.id).collect();
        let other_ids: Vec<RestaurantId> = partition.other.iter().map(|c| c.id).collect();
        assert_eq!(home_ids, vec![RestaurantId(1), RestaurantId(2)]);
        assert_eq!(other_ids, vec![RestaurantId(3), RestaurantId(4)]);
    }

    #[test]
    fn test_exclusion_applies_to_both_subsets() {
        let excluded: HashSet<RestaurantId> = [RestaurantId(2), RestaurantId(4)].into();
        let partition = partition_by_zone(&pool(), &excluded, ZoneId(10));

        assert_eq!(partition.home, vec![Candidate::new(RestaurantId(1), ZoneId(10))]);
        assert_eq!(partition.other, vec![Candidate::new(RestaurantId(3), ZoneId(20))]);
        assert_eq!(partition.eligible_len(), 2);
    }

    #[test]
    fn test_union_is_exactly_eligible_pool() {
        let excluded: HashSet<RestaurantId> = [RestaurantId(3)].into();
        let partition = partition_by_zone(&pool(), &excluded, ZoneId(10));

        let union: HashSet<RestaurantId> = partition.eligible().iter().map(|c| c.id).collect();
        let expected: HashSet<RestaurantId> =
            [RestaurantId(1), RestaurantId(2), RestaurantId(4)].into();
        assert_eq!(union, expected);
        assert_eq!(partition.eligible_len(), union.len());
    }

    #[test]
    fn test_unknown_home_zone_yields_empty_home() {
        let partition = partition_by_zone(&pool(), &HashSet::new(), ZoneId(99));
        assert!(partition.home.is_empty());
        assert_eq!(partition.other.len(), 4);
    }

    #[test]
    fn test_fully_excluded_pool_is_empty() {
        let excluded: HashSet<RestaurantId> = pool().iter().map(|c| c.id).collect();
        let partition = partition_by_zone(&pool(), &excluded, ZoneId(10));
        assert_eq!(partition.eligible_len(), 0);
    }
}
