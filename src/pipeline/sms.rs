use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{RestaurantId, SmsPick};
use crate::store::{RestaurantCatalog, SmsAudienceSource, SmsSink};

/// Counters for one SMS run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRunSummary {
    pub picks: usize,
    /// Users with nothing left to send
    pub users_skipped: usize,
}

/// The SMS channel flow: one uniformly random unseen restaurant per user.
///
/// No zone stratification here; the channel sends a single suggestion, so
/// the only rule is "never repeat a restaurant already sent to this user".
pub struct SmsRecJob {
    audience: Arc<dyn SmsAudienceSource>,
    catalog: Arc<dyn RestaurantCatalog>,
    sink: Arc<dyn SmsSink>,
}

impl SmsRecJob {
    pub fn new(
        audience: Arc<dyn SmsAudienceSource>,
        catalog: Arc<dyn RestaurantCatalog>,
        sink: Arc<dyn SmsSink>,
    ) -> Self {
        Self {
            audience,
            catalog,
            sink,
        }
    }

    pub async fn run(&self) -> AppResult<SmsRunSummary> {
        let mut rng = StdRng::from_entropy();
        self.run_with_rng(&mut rng).await
    }

    pub async fn run_with_rng<R: Rng + Send>(&self, rng: &mut R) -> AppResult<SmsRunSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("sms_rec", run_id = %run_id);

        async {
            let catalog = self.catalog.all_restaurants().await?;
            tracing::info!(restaurant_count = catalog.len(), "Restaurant catalog loaded");

            let audience = self.audience.sms_users().await?;
            tracing::info!(user_count = audience.len(), "SMS audience loaded");

            let mut picks = Vec::with_capacity(audience.len());
            let mut users_skipped = 0;

            for user in audience {
                let sent: HashSet<RestaurantId> =
                    user.sent_restaurant_ids.iter().copied().collect();
                let eligible: Vec<_> = catalog
                    .iter()
                    .filter(|restaurant| !sent.contains(&restaurant.id))
                    .collect();

                match eligible.choose(&mut *rng) {
                    Some(restaurant) => picks.push(SmsPick {
                        ts: Utc::now(),
                        user_id: user.user_id,
                        restaurant_id: restaurant.id,
                        name: restaurant.name.clone(),
                    }),
                    None => {
                        tracing::warn!(
                            user_id = %user.user_id,
                            "User has been sent every restaurant, skipping"
                        );
                        users_skipped += 1;
                    }
                }
            }

            if !picks.is_empty() {
                self.sink.write_picks(&picks).await?;
            }

            tracing::info!(
                picks = picks.len(),
                users_skipped,
                "SMS recommendation run completed"
            );

            Ok(SmsRunSummary {
                picks: picks.len(),
                users_skipped,
            })
        }
        .instrument(span)
        .await
    }
}
