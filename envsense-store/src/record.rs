use chrono::{DateTime, Utc};

/// One row of the `sensor_data` series. Identity is `(id, timestamp)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub id: i64,
    pub zone: String,
    pub telemetry_name: String,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// A reading before the store assigns it an id. A missing timestamp means "now".
#[derive(Clone, Debug, PartialEq)]
pub struct NewReading {
    pub zone: String,
    pub telemetry_name: String,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewReading {
    pub fn new(zone: impl Into<String>, telemetry_name: impl Into<String>, value: f64) -> Self {
        Self {
            zone: zone.into(),
            telemetry_name: telemetry_name.into(),
            value,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
