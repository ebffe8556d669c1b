use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub mod engine;
pub mod partition;
pub mod sampler;

pub use engine::generate_recommendations;
pub use partition::{partition_by_zone, ZonePartition};
pub use sampler::QuotaSampler;

/// Per-run draw quotas.
///
/// `total` is the list size to aim for; `home_zone_target` is the share of
/// it reserved for candidates in the user's home zone. Both are constant
/// for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    pub total: usize,
    pub home_zone_target: usize,
}

impl QuotaConfig {
    pub fn new(total: usize, home_zone_target: usize) -> AppResult<Self> {
        let config = Self {
            total,
            home_zone_target,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the quota invariant. Surfaced before any user is processed.
    pub fn validate(&self) -> AppResult<()> {
        if self.home_zone_target > self.total {
            return Err(AppError::Config(format!(
                "home_zone_target {} exceeds total {}",
                self.home_zone_target, self.total
            )));
        }
        Ok(())
    }
}
