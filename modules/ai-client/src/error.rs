use thiserror::Error;

/// Failure of a tool invocation at the JSON boundary.
///
/// A successful call always yields a `serde_json::Value`, even when that value
/// is a JSON string. Callers branch on `Ok`/`Err`, never on the payload type.
#[derive(Debug, Error)]
pub enum ToolCallError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArgs { tool: &'static str, message: String },

    #[error("Tool {tool} failed: {source}")]
    Failed {
        tool: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to serialize output of {tool}: {message}")]
    Serialize { tool: &'static str, message: String },
}

impl ToolCallError {
    /// Downcast the underlying tool error, if this is a `Failed` call.
    pub fn source_as<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            ToolCallError::Failed { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
