use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use envsense_store::SummaryError;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// An error that is already shaped for the HTTP caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<SummaryError> for ApiError {
    fn from(e: SummaryError) -> Self {
        match e {
            SummaryError::InvalidArgument(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            // the store diagnostic was logged by the service
            SummaryError::Dependency(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
