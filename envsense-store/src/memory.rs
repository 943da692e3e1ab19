use crate::query::BucketQuery;
use crate::record::{NewReading, SensorReading};
use crate::store::TimeSeriesStore;
use crate::summary::{Accumulator, BucketRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-process series with the same bucketing rules as the TimescaleDB store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    readings: RwLock<Vec<SensorReading>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading and return it with its assigned id.
    pub fn insert(&self, reading: NewReading) -> SensorReading {
        let mut readings = self.readings.write();
        let stored = SensorReading {
            id: readings.len() as i64 + 1,
            zone: reading.zone,
            telemetry_name: reading.telemetry_name,
            value: reading.value,
            timestamp: reading.timestamp.unwrap_or_else(Utc::now),
        };
        readings.push(stored.clone());
        stored
    }

    pub fn extend(&self, readings: impl IntoIterator<Item = NewReading>) {
        for r in readings {
            self.insert(r);
        }
    }

    pub fn len(&self) -> usize {
        self.readings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.read().is_empty()
    }
}

#[async_trait]
impl TimeSeriesStore for MemoryStore {
    async fn bucketed_aggregate(&self, query: &BucketQuery) -> anyhow::Result<Vec<BucketRow>> {
        let mut buckets: BTreeMap<DateTime<Utc>, Accumulator> = BTreeMap::new();

        {
            let readings = self.readings.read();
            for r in readings.iter().filter(|r| {
                r.zone == query.zone()
                    && r.telemetry_name == query.telemetry_name()
                    && query.contains(r.timestamp)
            }) {
                buckets
                    .entry(query.bucket_width().floor(r.timestamp))
                    .or_default()
                    .add(r.value);
            }
        }

        Ok(buckets
            .into_iter()
            .filter_map(|(bucket, acc)| acc.finish(bucket))
            .collect())
    }
}
