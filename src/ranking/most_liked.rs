use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{RestaurantId, TrainingRow};

use super::RankingModel;

/// Baseline ranker: restaurants ordered by how often they were liked.
///
/// Counts positive labels per restaurant over the training window. Ties
/// break on id so the ranking is stable across fits on the same data.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MostLiked {
    ranked_ids: Vec<RestaurantId>,
}

impl MostLiked {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankingModel for MostLiked {
    fn fit(&mut self, rows: &[TrainingRow]) {
        let mut like_counts: HashMap<RestaurantId, u64> = HashMap::new();
        for row in rows {
            if row.label == 1 {
                *like_counts.entry(row.restaurant_id).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(RestaurantId, u64)> = like_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        self.ranked_ids = ranked.into_iter().map(|(id, _)| id).collect();
    }

    fn predict(&self) -> Vec<RestaurantId> {
        self.ranked_ids.clone()
    }

    fn model_type(&self) -> &'static str {
        "most_liked"
    }

    fn artifact(&self) -> serde_json::Value {
        serde_json::json!({ "ranked_ids": self.ranked_ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(restaurant_id: i64, label: i64) -> TrainingRow {
        TrainingRow {
            restaurant_id: RestaurantId(restaurant_id),
            label,
        }
    }

    #[test]
    fn test_fit_ranks_by_like_count() {
        let mut model = MostLiked::new();
        model.fit(&[
            row(1, 1),
            row(2, 1),
            row(2, 1),
            row(3, 1),
            row(3, 1),
            row(3, 1),
        ]);

        assert_eq!(
            model.predict(),
            vec![RestaurantId(3), RestaurantId(2), RestaurantId(1)]
        );
    }

    #[test]
    fn test_fit_ignores_negative_labels() {
        let mut model = MostLiked::new();
        model.fit(&[row(1, 0), row(1, 0), row(2, 1)]);

        assert_eq!(model.predict(), vec![RestaurantId(2)]);
    }

    #[test]
    fn test_ties_break_on_id() {
        let mut model = MostLiked::new();
        model.fit(&[row(9, 1), row(4, 1), row(7, 1)]);

        assert_eq!(
            model.predict(),
            vec![RestaurantId(4), RestaurantId(7), RestaurantId(9)]
        );
    }

    #[test]
    fn test_unfitted_model_predicts_nothing() {
        let model = MostLiked::new();
        assert!(model.predict().is_empty());
    }

    #[test]
    fn test_artifact_carries_ranking() {
        let mut model = MostLiked::new();
        model.fit(&[row(5, 1), row(5, 1), row(8, 1)]);

        let artifact = model.artifact();
        assert_eq!(artifact["ranked_ids"], serde_json::json!([5, 8]));
    }
}
