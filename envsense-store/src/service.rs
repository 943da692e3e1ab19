use crate::error::{Result, SummaryError};
use crate::query::BucketQuery;
use crate::store::TimeSeriesStore;
use crate::summary::BucketedSummary;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::sync::Arc;

#[derive(Clone)]
pub struct SummaryService {
    store: Arc<dyn TimeSeriesStore>,
}

impl SummaryService {
    pub fn new(store: Arc<dyn TimeSeriesStore>) -> Self {
        Self { store }
    }

    /// Min/max/avg per bucket for one zone and telemetry name. Nothing reaches the
    /// store unless the range and width are valid.
    pub async fn get_bucketed_summary(
        &self,
        zone: &str,
        telemetry_name: &str,
        from_ts: DateTime<Utc>,
        to_ts: DateTime<Utc>,
        bucket_width: &str,
    ) -> Result<Vec<BucketedSummary>> {
        let query = BucketQuery::parse(zone, telemetry_name, from_ts, to_ts, bucket_width)?;
        self.summarize(&query).await
    }

    pub async fn summarize(&self, query: &BucketQuery) -> Result<Vec<BucketedSummary>> {
        query.validate()?;
        info!(
            "Summary requested for {}/{} from {} to {} ({})",
            query.zone(),
            query.telemetry_name(),
            query.from_ts(),
            query.to_ts(),
            query.bucket_width()
        );

        match self.store.bucketed_aggregate(query).await {
            Ok(rows) => Ok(rows.into_iter().map(BucketedSummary::from).collect()),
            Err(e) => {
                error!(
                    "Failed to aggregate {}/{}: {:#}",
                    query.zone(),
                    query.telemetry_name(),
                    e
                );
                Err(SummaryError::Dependency(e))
            }
        }
    }
}
