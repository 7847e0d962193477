use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ExaError, Result};

/// Inclusive bounds on `numResults` accepted by the API.
pub const MIN_NUM_RESULTS: u32 = 1;
pub const MAX_NUM_RESULTS: u32 = 100;

/// Content category filter understood by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Company,
    #[serde(rename = "research paper")]
    ResearchPaper,
    News,
    Pdf,
    Github,
    Tweet,
    #[serde(rename = "personal site")]
    PersonalSite,
    #[serde(rename = "linkedin profile")]
    LinkedinProfile,
    #[serde(rename = "financial report")]
    FinancialReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Auto,
    Neural,
    Keyword,
}

// --- Contents options ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContentsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_characters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_html_tags: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_sentences: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights_per_url: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Either a bare `true` or a detailed options object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentsToggle<T> {
    Enabled(bool),
    Options(T),
}

/// What page content to return alongside each result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ContentsToggle<TextContentsOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<ContentsToggle<HighlightsOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ContentsToggle<SummaryOptions>>,
}

impl ContentsOptions {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.highlights.is_none() && self.summary.is_none()
    }

    /// Request page text when nothing else was asked for.
    pub(crate) fn or_text(&self) -> ContentsOptions {
        if self.is_empty() {
            ContentsOptions {
                text: Some(ContentsToggle::Enabled(true)),
                ..Default::default()
            }
        } else {
            self.clone()
        }
    }
}

// --- Filters shared by /search and /findSimilar ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_crawl_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_crawl_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ResultFilters {
    fn validate(&self) -> Result<()> {
        if let (Some(include), Some(exclude)) = (&self.include_domains, &self.exclude_domains) {
            if !include.is_empty() && !exclude.is_empty() {
                return Err(ExaError::InvalidParameter(
                    "include_domains and exclude_domains cannot both be set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn validate_num_results(num_results: u32) -> Result<()> {
    if !(MIN_NUM_RESULTS..=MAX_NUM_RESULTS).contains(&num_results) {
        return Err(ExaError::InvalidParameter(format!(
            "num_results must be between {MIN_NUM_RESULTS} and {MAX_NUM_RESULTS}, got {num_results}"
        )));
    }
    Ok(())
}

// --- Requests ---

/// Body of `POST /findSimilar`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarRequest {
    pub url: String,
    pub num_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_source_domain: Option<bool>,
    #[serde(flatten)]
    pub filters: ResultFilters,
    #[serde(skip_serializing_if = "ContentsOptions::is_empty")]
    pub contents: ContentsOptions,
}

impl FindSimilarRequest {
    pub fn new(url: impl Into<String>, num_results: u32) -> Self {
        Self {
            url: url.into(),
            num_results,
            exclude_source_domain: None,
            filters: ResultFilters::default(),
            contents: ContentsOptions::default(),
        }
    }

    /// Reject requests the API would refuse, before anything is sent.
    pub fn validate(&self) -> Result<()> {
        let seed = self.url.trim();
        if seed.is_empty() {
            return Err(ExaError::InvalidParameter("url must not be empty".to_string()));
        }
        let parsed = Url::parse(seed)
            .map_err(|e| ExaError::InvalidParameter(format!("url is not a valid URI: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ExaError::InvalidParameter(format!(
                "url must be an http(s) URL with a host, got {seed}"
            )));
        }
        validate_num_results(self.num_results)?;
        self.filters.validate()
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub num_results: u32,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_autoprompt: Option<bool>,
    #[serde(flatten)]
    pub filters: ResultFilters,
    #[serde(skip_serializing_if = "ContentsOptions::is_empty")]
    pub contents: ContentsOptions,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, num_results: u32) -> Self {
        Self {
            query: query.into(),
            num_results,
            search_type: SearchType::default(),
            use_autoprompt: None,
            filters: ResultFilters::default(),
            contents: ContentsOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(ExaError::InvalidParameter("query must not be empty".to_string()));
        }
        validate_num_results(self.num_results)?;
        self.filters.validate()
    }
}

// --- Responses ---

/// A single page returned by `/search` or `/findSimilar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaResult {
    #[serde(default)]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub highlight_scores: Option<Vec<f64>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub autoprompt_string: Option<String>,
    #[serde(default)]
    pub results: Vec<ExaResult>,
}
