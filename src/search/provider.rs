use std::fmt;

use async_trait::async_trait;

use super::types::SearchResultItem;

/// Errors that can occur while querying the search service.
///
/// Callers treat every variant the same way (log and clear results); the
/// split only exists so the log line says what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Transport-level failure (DNS, connection refused, reset).
    Network(String),
    /// The service answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Network(msg) => write!(f, "network error: {msg}"),
            SearchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SearchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short name used in logs and the title bar.
    fn name(&self) -> &str;

    /// Runs one search for a non-empty keyword and returns the mapped items
    /// in server order.
    async fn search(&self, keyword: &str) -> Result<Vec<SearchResultItem>, SearchError>;
}
