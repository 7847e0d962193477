use std::sync::Arc;

use ai_client::{Tool, ToolDefinition};
use async_trait::async_trait;
use exa_client::{
    Category, ContentsOptions, ContentsToggle, ExaClient, ExaConfig, ExaError, ExaResult,
    FindSimilarRequest, HighlightsOptions, ResultFilters, SummaryOptions, TextContentsOptions,
    MAX_NUM_RESULTS, MIN_NUM_RESULTS,
};
use serde::{Deserialize, Serialize};

use crate::{clip_text, default_num_results, DEFAULT_MAX_TEXT_BYTES};

/// Finds pages similar to a seed URL.
#[derive(Clone)]
pub struct FindSimilarTool {
    client: Arc<ExaClient>,
    contents: ContentsOptions,
    max_text_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindSimilarArgs {
    pub url: String,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    #[serde(default)]
    pub include_domains: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(default)]
    pub start_crawl_date: Option<String>,
    #[serde(default)]
    pub end_crawl_date: Option<String>,
    #[serde(default)]
    pub start_published_date: Option<String>,
    #[serde(default)]
    pub end_published_date: Option<String>,
    #[serde(default)]
    pub exclude_source_domain: Option<bool>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl FindSimilarArgs {
    pub fn new(url: impl Into<String>, num_results: u32) -> Self {
        Self {
            url: url.into(),
            num_results,
            include_domains: None,
            exclude_domains: None,
            start_crawl_date: None,
            end_crawl_date: None,
            start_published_date: None,
            end_published_date: None,
            exclude_source_domain: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarResults {
    pub seed_url: String,
    pub request_id: Option<String>,
    pub results: Vec<ExaResult>,
}

impl FindSimilarTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self {
            client,
            contents: ContentsOptions::default(),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
    }

    pub fn from_config(config: ExaConfig) -> exa_client::Result<Self> {
        Ok(Self::new(Arc::new(ExaClient::new(config)?)))
    }

    pub fn with_text(mut self, options: TextContentsOptions) -> Self {
        self.contents.text = Some(ContentsToggle::Options(options));
        self
    }

    pub fn with_highlights(mut self, options: HighlightsOptions) -> Self {
        self.contents.highlights = Some(ContentsToggle::Options(options));
        self
    }

    pub fn with_summary(mut self, options: SummaryOptions) -> Self {
        self.contents.summary = Some(ContentsToggle::Options(options));
        self
    }

    pub fn with_max_text_bytes(mut self, max_text_bytes: usize) -> Self {
        self.max_text_bytes = max_text_bytes;
        self
    }

    fn request(&self, args: FindSimilarArgs) -> FindSimilarRequest {
        FindSimilarRequest {
            url: args.url.trim().to_string(),
            num_results: args.num_results,
            exclude_source_domain: args.exclude_source_domain,
            filters: ResultFilters {
                include_domains: args.include_domains,
                exclude_domains: args.exclude_domains,
                start_crawl_date: args.start_crawl_date,
                end_crawl_date: args.end_crawl_date,
                start_published_date: args.start_published_date,
                end_published_date: args.end_published_date,
                category: args.category,
            },
            contents: self.contents.clone(),
        }
    }
}

impl std::fmt::Debug for FindSimilarTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FindSimilarTool")
            .field("base_url", &self.client.base_url())
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FindSimilarTool {
    const NAME: &'static str = "exa_find_similar_results_json";
    type Error = ExaError;
    type Args = FindSimilarArgs;
    type Output = SimilarResults;

    async fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Find web pages similar to a given URL. Input should be a URL. \
                Returns a JSON list of similar pages with URLs, titles, scores and text."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "The seed URL to find similar pages for"
                    },
                    "num_results": {
                        "type": "integer",
                        "description": "Number of similar pages to return",
                        "minimum": MIN_NUM_RESULTS,
                        "maximum": MAX_NUM_RESULTS,
                        "default": crate::DEFAULT_NUM_RESULTS
                    },
                    "include_domains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Only return results from these domains"
                    },
                    "exclude_domains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Never return results from these domains"
                    },
                    "start_crawl_date": { "type": "string", "description": "ISO 8601 date" },
                    "end_crawl_date": { "type": "string", "description": "ISO 8601 date" },
                    "start_published_date": { "type": "string", "description": "ISO 8601 date" },
                    "end_published_date": { "type": "string", "description": "ISO 8601 date" },
                    "exclude_source_domain": {
                        "type": "boolean",
                        "description": "Exclude results from the seed URL's own domain"
                    },
                    "category": {
                        "type": "string",
                        "enum": [
                            "company", "research paper", "news", "pdf", "github",
                            "tweet", "personal site", "linkedin profile", "financial report"
                        ]
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error> {
        let request = self.request(args);
        let response = self.client.find_similar(&request).await?;

        let mut results = response.results;
        clip_text(&mut results, self.max_text_bytes);

        Ok(SimilarResults {
            seed_url: request.url,
            request_id: response.request_id,
            results,
        })
    }
}
