//! CrossRef works source.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::CrossRefConfig;
use crate::models::WorksPage;
use crate::sources::{PageRequest, SourceError, WorksSource};
use crate::utils::HttpClient;

/// CrossRef research source
///
/// Queries the `/works` endpoint of the CrossRef REST API by author.
#[derive(Debug, Clone)]
pub struct CrossRefSource {
    client: Arc<HttpClient>,
    base_url: String,
}

impl CrossRefSource {
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&CrossRefConfig::default())
    }

    pub fn from_config(config: &CrossRefConfig) -> Result<Self, SourceError> {
        let user_agent = user_agent(config.mailto.as_deref());
        let client = HttpClient::with_timeouts(
            &user_agent,
            config.request_timeout(),
            config.connect_timeout(),
        )
        .map_err(|e| SourceError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Use a different API root, e.g. a local stub server
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn works_url(&self, request: &PageRequest) -> String {
        format!(
            "{}/works?query.author={}&rows={}&offset={}",
            self.base_url,
            urlencoding::encode(&request.author),
            request.rows,
            request.offset
        )
    }
}

fn user_agent(mailto: Option<&str>) -> String {
    match mailto {
        Some(mailto) => format!(
            "{}/{} (mailto:{})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            mailto
        ),
        None => format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    }
}

#[async_trait]
impl WorksSource for CrossRefSource {
    fn id(&self) -> &str {
        "crossref"
    }

    fn name(&self) -> &str {
        "CrossRef"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Option<WorksPage>, SourceError> {
        if request.rows == 0 {
            return Err(SourceError::InvalidRequest(
                "rows must be greater than zero".to_string(),
            ));
        }

        let url = self.works_url(request);
        tracing::debug!(offset = request.offset, rows = request.rows, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to query CrossRef: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "CrossRef API returned status: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Failed to parse JSON: {}", e)))?;

        WorksPage::from_json(body)
            .map_err(|e| SourceError::Parse(format!("Unexpected work record: {}", e)))
    }
}
