pub mod find_similar;
pub mod search;

pub use find_similar::{FindSimilarArgs, FindSimilarTool, SimilarResults};
pub use search::{SearchArgs, SearchResults, SearchTool};

use std::sync::Arc;

use ai_client::{truncate_to_char_boundary, ToolSet};
use exa_client::{ExaClient, ExaResult};

/// Default cap on page text per record, in bytes.
pub const DEFAULT_MAX_TEXT_BYTES: usize = 8000;

pub(crate) const DEFAULT_NUM_RESULTS: u32 = 10;

pub(crate) fn default_num_results() -> u32 {
    DEFAULT_NUM_RESULTS
}

/// Both Exa tools over one shared client.
pub fn exa_toolset(client: Arc<ExaClient>) -> ToolSet {
    ToolSet::new()
        .tool(FindSimilarTool::new(client.clone()))
        .tool(SearchTool::new(client))
}

pub(crate) fn clip_text(results: &mut [ExaResult], max_len: usize) {
    for result in results {
        if let Some(text) = result.text.as_mut() {
            if text.len() > max_len {
                let clipped = truncate_to_char_boundary(text, max_len).len();
                text.truncate(clipped);
                text.push_str("...");
            }
        }
    }
}
