//! HTTP search provider.
//!
//! Issues `GET {endpoint}?keyword=<query>` and maps the `results` array into
//! [`SearchResultItem`]s. No auth, no custom headers, no timeout beyond what
//! reqwest does by default.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::provider::{SearchError, SearchProvider};
use super::types::{SearchResponse, SearchResultItem};

/// Query-string parameter carrying the user's text.
pub const KEYWORD_PARAM: &str = "keyword";

pub struct HttpSearchProvider {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSearchProvider {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

/// Parses a response body into items, dropping records that fail validation.
pub fn parse_results(body: &str) -> Result<Vec<SearchResultItem>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    let total = response.results.len();
    let items: Vec<SearchResultItem> = response
        .results
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match SearchResultItem::try_from(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Dropping search record #{}: {}", index, e);
                None
            }
        })
        .collect();

    if items.len() != total {
        debug!("Kept {} of {} search records", items.len(), total);
    }
    Ok(items)
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn search(&self, keyword: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        info!("Search request: endpoint={}, keyword={:?}", self.endpoint, keyword);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(KEYWORD_PARAM, keyword)])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        debug!("Search response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Search API error: {} - {}", status, err_body);
            return Err(SearchError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let items = parse_results(&body)?;
        info!("Search complete: {} results for {:?}", items.len(), keyword);
        Ok(items)
    }
}
