use crate::bucket::BucketWidth;
use crate::error::{Result, SummaryError};
use chrono::{DateTime, Utc};

pub const INVERTED_RANGE: &str = "from_ts must be before to_ts";

/// A validated bucketed-aggregate request. Both ends of the range are inclusive.
/// Built only through `new` or `parse`.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketQuery {
    pub(crate) zone: String,
    pub(crate) telemetry_name: String,
    pub(crate) from_ts: DateTime<Utc>,
    pub(crate) to_ts: DateTime<Utc>,
    pub(crate) bucket_width: BucketWidth,
}

impl BucketQuery {
    pub fn new(
        zone: impl Into<String>,
        telemetry_name: impl Into<String>,
        from_ts: DateTime<Utc>,
        to_ts: DateTime<Utc>,
        bucket_width: BucketWidth,
    ) -> Result<Self> {
        check_range(from_ts, to_ts)?;

        Ok(Self {
            zone: zone.into(),
            telemetry_name: telemetry_name.into(),
            from_ts,
            to_ts,
            bucket_width,
        })
    }

    /// Validates the range first, then the width text.
    pub fn parse(
        zone: impl Into<String>,
        telemetry_name: impl Into<String>,
        from_ts: DateTime<Utc>,
        to_ts: DateTime<Utc>,
        bucket_width: &str,
    ) -> Result<Self> {
        check_range(from_ts, to_ts)?;
        let width = bucket_width.parse()?;

        Self::new(zone, telemetry_name, from_ts, to_ts, width)
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn telemetry_name(&self) -> &str {
        &self.telemetry_name
    }

    pub fn from_ts(&self) -> DateTime<Utc> {
        self.from_ts
    }

    pub fn to_ts(&self) -> DateTime<Utc> {
        self.to_ts
    }

    pub fn bucket_width(&self) -> BucketWidth {
        self.bucket_width
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from_ts <= ts && ts <= self.to_ts
    }

    /// Re-checks the range; fails the same way `new` does.
    pub fn validate(&self) -> Result<()> {
        check_range(self.from_ts, self.to_ts)
    }
}

fn check_range(from_ts: DateTime<Utc>, to_ts: DateTime<Utc>) -> Result<()> {
    if from_ts > to_ts {
        return Err(SummaryError::invalid(INVERTED_RANGE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 16, h, 0, 0).unwrap()
    }

    #[test]
    fn inverted_range_wins_over_bad_width() {
        let err = BucketQuery::parse("ZoneA", "temperature", ts(10), ts(9), "3 days").unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), INVERTED_RANGE);
    }

    #[test]
    fn bad_width_on_valid_range() {
        let err = BucketQuery::parse("ZoneA", "temperature", ts(9), ts(10), "3 days").unwrap_err();
        assert!(err.to_string().starts_with("Invalid bucket_width"));
    }

    #[test]
    fn equal_ends_are_a_valid_range() {
        let q = BucketQuery::parse("ZoneA", "temperature", ts(9), ts(9), "1 minute").unwrap();
        assert_eq!(q.bucket_width(), BucketWidth::OneMinute);
        assert_eq!(q.zone(), "ZoneA");
        assert_eq!(q.telemetry_name(), "temperature");
        assert_eq!((q.from_ts(), q.to_ts()), (ts(9), ts(9)));
        assert!(q.validate().is_ok());
        assert!(q.contains(ts(9)));
    }

    #[test]
    fn range_is_inclusive() {
        let q = BucketQuery::new("ZoneA", "humidity", ts(1), ts(5), BucketWidth::OneHour).unwrap();
        assert!(q.contains(ts(1)));
        assert!(q.contains(ts(5)));
        assert!(!q.contains(ts(0)));
        assert!(!q.contains(ts(6)));
    }
}
