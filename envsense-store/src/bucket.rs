use crate::error::SummaryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 2000-01-03T00:00:00Z, a Monday. TimescaleDB uses the same default origin for
/// `time_bucket`, so in-process and push-down bucketing agree.
pub const BUCKET_ORIGIN_SECS: i64 = 946_857_600;

pub fn bucket_origin() -> DateTime<Utc> {
    DateTime::from_timestamp(BUCKET_ORIGIN_SECS, 0).unwrap_or_default()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BucketWidth {
    OneMinute,
    FiveMinutes,
    #[default]
    OneHour,
    OneDay,
    OneWeek,
}

impl BucketWidth {
    pub const ALL: [BucketWidth; 5] = [
        BucketWidth::OneMinute,
        BucketWidth::FiveMinutes,
        BucketWidth::OneHour,
        BucketWidth::OneDay,
        BucketWidth::OneWeek,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BucketWidth::OneMinute => "1 minute",
            BucketWidth::FiveMinutes => "5 minutes",
            BucketWidth::OneHour => "1 hour",
            BucketWidth::OneDay => "1 day",
            BucketWidth::OneWeek => "1 week",
        }
    }

    pub fn seconds(self) -> i64 {
        match self {
            BucketWidth::OneMinute => 60,
            BucketWidth::FiveMinutes => 5 * 60,
            BucketWidth::OneHour => 60 * 60,
            BucketWidth::OneDay => 24 * 60 * 60,
            BucketWidth::OneWeek => 7 * 24 * 60 * 60,
        }
    }

    /// Start of the bucket that contains `ts`.
    pub fn floor(self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let width = self.seconds() * 1_000_000;
        let origin = BUCKET_ORIGIN_SECS * 1_000_000;
        let offset = ts.timestamp_micros() - origin;
        let start = origin + offset.div_euclid(width) * width;

        DateTime::from_timestamp_micros(start).unwrap_or(ts)
    }

    fn accepted() -> String {
        BucketWidth::ALL
            .iter()
            .map(|w| w.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketWidth {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BucketWidth::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| {
                SummaryError::invalid(format!(
                    "Invalid bucket_width. Must be one of {}",
                    BucketWidth::accepted()
                ))
            })
    }
}

impl TryFrom<String> for BucketWidth {
    type Error = SummaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BucketWidth> for String {
    fn from(w: BucketWidth) -> Self {
        w.as_str().to_string()
    }
}
