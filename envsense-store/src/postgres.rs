use crate::bucket::bucket_origin;
use crate::query::BucketQuery;
use crate::store::TimeSeriesStore;
use crate::summary::BucketRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

// Width and origin are bound, never spliced into the statement text.
const BUCKETED_AGGREGATE: &str = r#"
    SELECT
        time_bucket(make_interval(secs => $1), "timestamp", $2) AS bucket,
        MIN(value) AS "min",
        MAX(value) AS "max",
        AVG(value) AS "avg"
    FROM sensor_data
    WHERE zone = $3
      AND telemetry_name = $4
      AND "timestamp" BETWEEN $5 AND $6
    GROUP BY bucket
    ORDER BY bucket ASC
"#;

/// TimescaleDB-backed store over the `sensor_data` hypertable.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool in a single attempt.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connecting to the time-series database")?;

        Ok(Self::from_pool(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TimeSeriesStore for PgStore {
    async fn bucketed_aggregate(&self, query: &BucketQuery) -> Result<Vec<BucketRow>> {
        let rows: Vec<BucketRow> = sqlx::query_as(BUCKETED_AGGREGATE)
            .bind(query.bucket_width().seconds() as f64)
            .bind(bucket_origin())
            .bind(query.zone())
            .bind(query.telemetry_name())
            .bind(query.from_ts())
            .bind(query.to_ts())
            .fetch_all(&self.pool)
            .await
            .with_context(|| {
                format!(
                    "bucketed aggregate for {}/{} ({})",
                    query.zone(),
                    query.telemetry_name(),
                    query.bucket_width()
                )
            })?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketWidth;
    use chrono::{TimeZone, Utc};

    #[test]
    fn statement_has_no_width_literal() {
        for w in BucketWidth::ALL {
            assert!(!BUCKETED_AGGREGATE.contains(w.as_str()));
        }
        assert!(BUCKETED_AGGREGATE.contains("BETWEEN $5 AND $6"));
    }

    // Needs a TimescaleDB with the sensor_data hypertable: DATABASE_URL=... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn aggregates_against_live_database() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let store = PgStore::connect(&url, 1).await.unwrap();

        let zone = format!("test-{}", Utc::now().timestamp_micros());
        for (value, minute) in [(20.0, 0), (30.0, 30)] {
            sqlx::query(
                r#"INSERT INTO sensor_data (zone, telemetry_name, value, "timestamp") VALUES ($1, 'temperature', $2, $3)"#,
            )
            .bind(&zone)
            .bind(value)
            .bind(Utc.with_ymd_and_hms(2025, 7, 16, 10, minute, 0).unwrap())
            .execute(store.pool())
            .await
            .unwrap();
        }

        let q = BucketQuery::new(
            zone,
            "temperature",
            Utc.with_ymd_and_hms(2025, 7, 16, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 7, 17, 0, 0, 0).unwrap(),
            BucketWidth::OneHour,
        )
        .unwrap();
        let rows = store.bucketed_aggregate(&q).await.unwrap();

        assert_eq!(
            rows,
            vec![BucketRow {
                bucket: Utc.with_ymd_and_hms(2025, 7, 16, 10, 0, 0).unwrap(),
                min: 20.0,
                max: 30.0,
                avg: 25.0,
            }]
        );
    }
}
