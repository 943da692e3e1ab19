mod bucket;
mod error;
mod memory;
mod postgres;
mod query;
mod record;
mod service;
mod store;
mod summary;

pub use bucket::{BUCKET_ORIGIN_SECS, BucketWidth, bucket_origin};
pub use error::{Result, SummaryError};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use query::{BucketQuery, INVERTED_RANGE};
pub use record::{NewReading, SensorReading};
pub use service::SummaryService;
pub use store::TimeSeriesStore;
pub use summary::{Accumulator, BucketRow, BucketedSummary};
