use std::sync::Arc;

use ai_client::{Tool, ToolDefinition};
use async_trait::async_trait;
use exa_client::{
    Category, ContentsOptions, ContentsToggle, ExaClient, ExaError, ExaResult, HighlightsOptions,
    ResultFilters, SearchRequest, SearchType, SummaryOptions, TextContentsOptions,
    MAX_NUM_RESULTS, MIN_NUM_RESULTS,
};
use serde::{Deserialize, Serialize};

use crate::{clip_text, default_num_results, DEFAULT_MAX_TEXT_BYTES};

#[derive(Clone)]
pub struct SearchTool {
    client: Arc<ExaClient>,
    contents: ContentsOptions,
    max_text_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    #[serde(default)]
    pub search_type: Option<SearchType>,
    #[serde(default)]
    pub use_autoprompt: Option<bool>,
    #[serde(default)]
    pub include_domains: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_domains: Option<Vec<String>>,
    #[serde(default)]
    pub start_published_date: Option<String>,
    #[serde(default)]
    pub end_published_date: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl SearchArgs {
    pub fn new(query: impl Into<String>, num_results: u32) -> Self {
        Self {
            query: query.into(),
            num_results,
            search_type: None,
            use_autoprompt: None,
            include_domains: None,
            exclude_domains: None,
            start_published_date: None,
            end_published_date: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub request_id: Option<String>,
    pub autoprompt_string: Option<String>,
    pub results: Vec<ExaResult>,
}

impl SearchTool {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self {
            client,
            contents: ContentsOptions::default(),
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
        }
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
}

impl std::fmt::Debug for SearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchTool")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for SearchTool {
    const NAME: &'static str = "exa_search_results_json";
    type Error = ExaError;
    type Args = SearchArgs;
    type Output = SearchResults;

    async fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web with Exa. Input should be a search query. \
                Returns a JSON list of pages with URLs, titles, scores and text."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "num_results": {
                        "type": "integer",
                        "minimum": MIN_NUM_RESULTS,
                        "maximum": MAX_NUM_RESULTS,
                        "default": crate::DEFAULT_NUM_RESULTS
                    },
                    "search_type": {
                        "type": "string",
                        "enum": ["auto", "neural", "keyword"]
                    },
                    "use_autoprompt": { "type": "boolean" },
                    "include_domains": { "type": "array", "items": { "type": "string" } },
                    "exclude_domains": { "type": "array", "items": { "type": "string" } },
                    "start_published_date": { "type": "string", "description": "ISO 8601 date" },
                    "end_published_date": { "type": "string", "description": "ISO 8601 date" },
                    "category": {
                        "type": "string",
                        "enum": [
                            "company", "research paper", "news", "pdf", "github",
                            "tweet", "personal site", "linkedin profile", "financial report"
                        ]
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error> {
        let request = SearchRequest {
            query: args.query,
            num_results: args.num_results,
            search_type: args.search_type.unwrap_or_default(),
            use_autoprompt: args.use_autoprompt,
            filters: ResultFilters {
                include_domains: args.include_domains,
                exclude_domains: args.exclude_domains,
                start_published_date: args.start_published_date,
                end_published_date: args.end_published_date,
                category: args.category,
                ..Default::default()
            },
            contents: self.contents.clone(),
        };
        let response = self.client.search(&request).await?;

        let mut results = response.results;
        clip_text(&mut results, self.max_text_bytes);

        Ok(SearchResults {
            query: request.query,
            request_id: response.request_id,
            autoprompt_string: response.autoprompt_string,
            results,
        })
    }
}
