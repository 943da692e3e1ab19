use crate::auth::require_api_key;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, middleware};
use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use envsense_store::{BucketWidth, BucketedSummary};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
struct BucketedSummaryRequest {
    zone: String,
    telemetry_name: String,
    #[serde(deserialize_with = "utc_instant")]
    from_ts: DateTime<Utc>,
    #[serde(deserialize_with = "utc_instant")]
    to_ts: DateTime<Utc>,
    bucket_width: Option<String>,
}

/// RFC 3339 with any offset, or a bare local timestamp taken as UTC.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, ParseError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(e) => ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or(e),
    }
}

fn utc_instant<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    parse_instant(&s).map_err(serde::de::Error::custom)
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/summary/bucketed", get(get_bucketed_summary))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}

async fn get_bucketed_summary(
    State(state): State<AppState>,
    q: Result<Query<BucketedSummaryRequest>, QueryRejection>,
) -> Result<Json<Vec<BucketedSummary>>, ApiError> {
    let Query(q) = q.map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.body_text()))?;
    let width = q
        .bucket_width
        .unwrap_or_else(|| BucketWidth::default().to_string());

    let summaries = state
        .summaries
        .get_bucketed_summary(&q.zone, &q.telemetry_name, q.from_ts, q.to_ts, &width)
        .await?;

    Ok(Json(summaries))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_offsets_and_bare_timestamps() {
        let ten = Utc.with_ymd_and_hms(2025, 7, 16, 10, 0, 0).unwrap();
        assert_eq!(parse_instant("2025-07-16T10:00:00Z").unwrap(), ten);
        assert_eq!(parse_instant("2025-07-16T12:00:00+02:00").unwrap(), ten);
        assert_eq!(parse_instant("2025-07-16T10:00:00").unwrap(), ten);
        assert_eq!(parse_instant("2025-07-16 10:00:00").unwrap(), ten);
        assert_eq!(
            parse_instant("2025-07-16T10:00:00.250").unwrap(),
            ten + chrono::TimeDelta::milliseconds(250)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_instant("yesterday").is_err());
        assert!(parse_instant("2025-07-16").is_err());
        assert!(parse_instant("").is_err());
    }
}
