use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("payload marker {marker:?} not found in page")]
    MarkerNotFound { marker: String },

    #[error("embedded payload starting at byte {start} is not terminated")]
    UnterminatedPayload { start: usize },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Coarse failure classes reported when the pipeline falls back to an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The page could not be fetched.
    NetworkFailure,
    /// The page no longer contains the payload marker.
    MarkerNotFound,
    /// The payload is unterminated, not JSON, or not the expected shape.
    MalformedPayload,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::NetworkFailure => write!(f, "network_failure"),
            FailureKind::MarkerNotFound => write!(f, "marker_not_found"),
            FailureKind::MalformedPayload => write!(f, "malformed_payload"),
        }
    }
}

impl ScraperError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. } => {
                FailureKind::NetworkFailure
            }
            ScraperError::MarkerNotFound { .. } => FailureKind::MarkerNotFound,
            ScraperError::UnterminatedPayload { .. } | ScraperError::Deserialize { .. } => {
                FailureKind::MalformedPayload
            }
        }
    }
}
