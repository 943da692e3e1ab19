use crate::query::BucketQuery;
use crate::summary::BucketRow;
use async_trait::async_trait;

/// A time-series store that can aggregate readings into fixed-width buckets
/// on its own side.
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// One row per non-empty bucket, ascending by bucket start.
    async fn bucketed_aggregate(&self, query: &BucketQuery) -> anyhow::Result<Vec<BucketRow>>;
}
