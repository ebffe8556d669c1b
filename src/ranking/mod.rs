use crate::error::{AppError, AppResult};
use crate::models::{RestaurantId, TrainingRow};

pub mod most_liked;

pub use most_liked::MostLiked;

/// Capability interface for ranking strategies.
///
/// A fitted model turns labeled impression history into an ordered id list.
/// The daily sampling flow does not consume model output today; the trait is
/// the seam where a learned ranker can replace random selection without
/// touching the quota or backfill policy.
pub trait RankingModel: Send + Sync {
    /// Fits the model on labeled impression rows
    fn fit(&mut self, rows: &[TrainingRow]);

    /// Returns restaurant ids ranked best-first
    fn predict(&self) -> Vec<RestaurantId>;

    /// Architecture name used for artifact storage and run metadata
    fn model_type(&self) -> &'static str;

    /// Serializes the fitted state for the model store
    fn artifact(&self) -> serde_json::Value;
}

/// Resolves a model architecture named in configuration
pub fn model_from_arch(arch: &str) -> AppResult<Box<dyn RankingModel>> {
    match arch {
        "most_liked" => Ok(Box::new(MostLiked::new())),
        other => Err(AppError::UnknownModel(other.to_string())),
    }
}
