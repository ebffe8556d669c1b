use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::UserContext;
use crate::sampling::{generate_recommendations, QuotaConfig};
use crate::store::{CandidateSource, RecommendationSink, UserSource};

/// How a daily run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Output for the run date already existed; nothing was written
    SkippedExisting,
}

/// Counters for one daily run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ds: NaiveDate,
    pub outcome: RunOutcome,
    pub users_scored: usize,
    pub users_skipped: usize,
    /// Users whose list came back shorter than the quota
    pub under_quota: usize,
}

/// The daily stratified recommendation flow.
///
/// Loads the latest candidate pool and user rows, generates one list per
/// user, and appends the batch to the sink. Re-running on a date that
/// already has output is a no-op. Each run draws from a fresh entropy-seeded
/// random stream, so parallel deployments do not correlate.
pub struct DailyRecsJob {
    candidates: Arc<dyn CandidateSource>,
    users: Arc<dyn UserSource>,
    sink: Arc<dyn RecommendationSink>,
    config: QuotaConfig,
    model_type: String,
    model_id: i64,
}

impl DailyRecsJob {
    pub fn new(
        candidates: Arc<dyn CandidateSource>,
        users: Arc<dyn UserSource>,
        sink: Arc<dyn RecommendationSink>,
        config: QuotaConfig,
        model_type: String,
        model_id: i64,
    ) -> Self {
        Self {
            candidates,
            users,
            sink,
            config,
            model_type,
            model_id,
        }
    }

    /// Runs the flow for today's date
    pub async fn run(&self) -> AppResult<RunSummary> {
        self.run_for_date(Utc::now().date_naive()).await
    }

    /// Runs the flow for an explicit run date
    pub async fn run_for_date(&self, ds: NaiveDate) -> AppResult<RunSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("daily_recs", run_id = %run_id, ds = %ds);

        async {
            self.config.validate()?;

            if self.sink.has_output_for(ds).await? {
                tracing::info!("Output already exists for run date, skipping");
                return Ok(RunSummary {
                    ds,
                    outcome: RunOutcome::SkippedExisting,
                    users_scored: 0,
                    users_skipped: 0,
                    under_quota: 0,
                });
            }

            let pool = self.candidates.latest_candidates().await?;
            tracing::info!(candidate_count = pool.len(), "Candidate pool loaded");

            let rows = self.users.latest_users().await?;
            tracing::info!(user_count = rows.len(), "User rows loaded");

            // One bad row must not abort the batch: report it and move on.
            let mut contexts: Vec<UserContext> = Vec::with_capacity(rows.len());
            let mut users_skipped = 0;
            for row in rows {
                match row.into_context() {
                    Ok(context) => contexts.push(context),
                    Err(e) => {
                        tracing::warn!(error = %e, "Skipping malformed user row");
                        users_skipped += 1;
                    }
                }
            }

            let mut rng = StdRng::from_entropy();
            let recommendations =
                generate_recommendations(&contexts, &pool, self.config, &mut rng)?;

            let under_quota = recommendations
                .iter()
                .filter(|rec| rec.is_under_quota(self.config.total))
                .count();
            if under_quota > 0 {
                tracing::warn!(
                    under_quota,
                    total = recommendations.len(),
                    "Some users received fewer recommendations than the quota"
                );
            }

            self.sink
                .write(ds, &recommendations, &self.model_type, self.model_id)
                .await?;

            tracing::info!(
                users_scored = recommendations.len(),
                users_skipped,
                under_quota,
                "Daily recommendation run completed"
            );

            Ok(RunSummary {
                ds,
                outcome: RunOutcome::Completed,
                users_scored: recommendations.len(),
                users_skipped,
                under_quota,
            })
        }
        .instrument(span)
        .await
    }
}
