pub mod config;
pub mod error;
pub mod types;

pub use config::ExaConfig;
pub use error::{ErrorKind, ExaError, Result};
pub use types::{
    Category, ContentsOptions, ContentsToggle, ExaResult, FindSimilarRequest, HighlightsOptions,
    ResultFilters, SearchRequest, SearchResponse, SearchType, SummaryOptions,
    TextContentsOptions, MAX_NUM_RESULTS, MIN_NUM_RESULTS,
};

use serde::Serialize;

pub struct ExaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    pub fn new(config: ExaConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ExaConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Find pages similar to a seed URL via `POST /findSimilar`.
    pub async fn find_similar(&self, request: &FindSimilarRequest) -> Result<SearchResponse> {
        request.validate()?;
        tracing::info!(
            url = %request.url,
            num_results = request.num_results,
            "Exa findSimilar"
        );

        let body = FindSimilarRequest {
            url: request.url.trim().to_string(),
            contents: request.contents.or_text(),
            ..request.clone()
        };
        let resp = self.post("findSimilar", &body).await?;
        tracing::info!(
            url = %request.url,
            count = resp.results.len(),
            "Exa findSimilar complete"
        );
        Ok(resp)
    }

    /// Run a web search via `POST /search`.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        request.validate()?;
        tracing::info!(
            query = %request.query,
            num_results = request.num_results,
            "Exa search"
        );

        let body = SearchRequest {
            contents: request.contents.or_text(),
            ..request.clone()
        };
        let resp = self.post("search", &body).await?;
        tracing::info!(
            query = %request.query,
            count = resp.results.len(),
            "Exa search complete"
        );
        Ok(resp)
    }

    async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<SearchResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(
            endpoint,
            body = %serde_json::to_string(body).unwrap_or_default(),
            "Sending Exa request"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), %message, "Exa API returned error");
            return Err(ExaError::from_status(status.as_u16(), message));
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for ExaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
