use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    /// The caller asked for something the query contract does not allow.
    #[error("{0}")]
    InvalidArgument(String),

    /// The time-series store failed. The source is kept for logging only.
    #[error("time-series store unavailable")]
    Dependency(#[source] anyhow::Error),
}

impl SummaryError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SummaryError::InvalidArgument(msg.into())
    }

    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SummaryError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;
