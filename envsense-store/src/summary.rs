use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One non-empty bucket as returned by a store.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct BucketRow {
    pub bucket: DateTime<Utc>,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// The response record for one bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BucketedSummary {
    pub bucket: DateTime<Utc>,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl From<BucketRow> for BucketedSummary {
    fn from(row: BucketRow) -> Self {
        BucketedSummary {
            bucket: row.bucket,
            min: row.min,
            max: row.max,
            avg: row.avg,
        }
    }
}

/// Running min/max/avg over the readings of a single bucket.
#[derive(Clone, Debug)]
pub struct Accumulator {
    min: f64,
    max: f64,
    sum: f64,
    count: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }

    /// Add a reading value to the bucket. NaN is not a measurement and is skipped.
    pub fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Close the bucket. Returns None if nothing was added.
    pub fn finish(&self, bucket: DateTime<Utc>) -> Option<BucketRow> {
        if self.count == 0 {
            return None;
        }

        // summing can drift a hair outside [min, max] for near-equal values
        let mut avg = self.sum / self.count as f64;
        if self.min <= self.max {
            avg = avg.clamp(self.min, self.max);
        }

        Some(BucketRow {
            bucket,
            min: self.min,
            max: self.max,
            avg,
        })
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bucket() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 16, 10, 0, 0).unwrap()
    }

    #[test]
    fn empty_bucket_yields_nothing() {
        assert_eq!(Accumulator::new().finish(bucket()), None);
    }

    #[test]
    fn single_reading_fills_all_three() {
        let mut acc = Accumulator::new();
        acc.add(21.5);
        let row = acc.finish(bucket()).unwrap();
        assert_eq!((row.min, row.max, row.avg), (21.5, 21.5, 21.5));
    }

    #[test]
    fn min_max_avg() {
        let mut acc = Accumulator::default();
        for v in [20.0, 30.0, 25.0, 21.0] {
            acc.add(v);
        }
        let row = acc.finish(bucket()).unwrap();
        assert_eq!(row.min, 20.0);
        assert_eq!(row.max, 30.0);
        assert_eq!(row.avg, 24.0);
    }

    #[test]
    fn all_nan_bucket_yields_nothing() {
        let mut acc = Accumulator::new();
        acc.add(f64::NAN);
        acc.add(f64::NAN);
        assert_eq!(acc.finish(bucket()), None);
    }

    #[test]
    fn nan_is_skipped_among_real_values() {
        let mut acc = Accumulator::new();
        for v in [18.0, f64::NAN, 22.0] {
            acc.add(v);
        }
        let row = acc.finish(bucket()).unwrap();
        assert_eq!((row.min, row.max, row.avg), (18.0, 22.0, 20.0));
    }

    #[test]
    fn infinite_values_do_not_panic() {
        let mut acc = Accumulator::new();
        acc.add(f64::INFINITY);
        acc.add(f64::NEG_INFINITY);
        let row = acc.finish(bucket()).unwrap();
        assert_eq!((row.min, row.max), (f64::NEG_INFINITY, f64::INFINITY));
        assert!(row.avg.is_nan());
    }

    #[test]
    fn avg_stays_inside_bounds() {
        let mut acc = Accumulator::new();
        for _ in 0..10 {
            acc.add(0.1);
        }
        let row = acc.finish(bucket()).unwrap();
        assert!(row.min <= row.avg && row.avg <= row.max);
    }

    #[test]
    fn shaper_copies_fields() {
        let row = BucketRow { bucket: bucket(), min: 1.0, max: 3.0, avg: 2.0 };
        let out = BucketedSummary::from(row);
        assert_eq!(out.bucket, bucket());
        assert_eq!((out.min, out.max, out.avg), (1.0, 3.0, 2.0));
    }

    #[test]
    fn serializes_bucket_as_rfc3339() {
        let out = BucketedSummary { bucket: bucket(), min: 20.0, max: 30.0, avg: 25.0 };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "bucket": "2025-07-16T10:00:00Z",
                "min": 20.0,
                "max": 30.0,
                "avg": 25.0
            })
        );
    }
}
