use std::sync::Arc;

use chrono::NaiveDate;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::ranking::model_from_arch;
use crate::store::{ModelStore, TrainingSource};

/// Counters for one training run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainSummary {
    pub model_type: String,
    pub rows: usize,
    pub ranked: usize,
}

/// The training flow: fit a ranking model over a labeled impression window
/// and persist the fitted artifact.
pub struct TrainJob {
    source: Arc<dyn TrainingSource>,
    store: Arc<dyn ModelStore>,
}

impl TrainJob {
    pub fn new(source: Arc<dyn TrainingSource>, store: Arc<dyn ModelStore>) -> Self {
        Self { source, store }
    }

    pub async fn run(
        &self,
        arch: &str,
        start_ds: NaiveDate,
        end_ds: NaiveDate,
    ) -> AppResult<TrainSummary> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "train",
            run_id = %run_id,
            arch,
            start_ds = %start_ds,
            end_ds = %end_ds,
        );

        async {
            // Unknown architectures fail before any data is pulled.
            let mut model = model_from_arch(arch)?;

            let rows = self.source.labeled_rows(start_ds, end_ds).await?;
            tracing::info!(row_count = rows.len(), "Training rows loaded");

            model.fit(&rows);
            let ranked = model.predict().len();

            self.store
                .save_artifact(model.model_type(), model.artifact())
                .await?;

            tracing::info!(ranked, "Model fitted and artifact stored");

            Ok(TrainSummary {
                model_type: model.model_type().to_string(),
                rows: rows.len(),
                ranked,
            })
        }
        .instrument(span)
        .await
    }
}
