use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use crate::error::ToolCallError;

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[async_trait]
pub trait Tool: Send + Sync {
    const NAME: &'static str;
    type Error: Error + Send + Sync + 'static;
    type Args: DeserializeOwned + Send + Sync;
    type Output: Serialize + Send + Sync;

    async fn definition(&self) -> ToolDefinition;
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
pub trait DynTool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn definition(&self) -> ToolDefinition;
    async fn call_json(&self, args: Value) -> Result<Value, ToolCallError>;
}

pub struct ToolWrapper<T: Tool>(pub T);

#[async_trait]
impl<T: Tool> DynTool for ToolWrapper<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    async fn definition(&self) -> ToolDefinition {
        self.0.definition().await
    }

    async fn call_json(&self, args: Value) -> Result<Value, ToolCallError> {
        let parsed_args: T::Args =
            serde_json::from_value(args).map_err(|e| ToolCallError::InvalidArgs {
                tool: T::NAME,
                message: e.to_string(),
            })?;

        let result = self.0.call(parsed_args).await.map_err(|e| {
            tracing::warn!(tool = T::NAME, error = %e, "Tool call failed");
            ToolCallError::Failed {
                tool: T::NAME,
                source: Box::new(e),
            }
        })?;

        serde_json::to_value(result).map_err(|e| ToolCallError::Serialize {
            tool: T::NAME,
            message: e.to_string(),
        })
    }
}

/// Name-indexed collection of tools, dispatched by JSON arguments.
#[derive(Default, Clone)]
pub struct ToolSet {
    tools: BTreeMap<&'static str, Arc<dyn DynTool>>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool<T: Tool + 'static>(self, tool: T) -> Self {
        self.dyn_tool(Arc::new(ToolWrapper(tool)))
    }

    pub fn dyn_tool(mut self, tool: Arc<dyn DynTool>) -> Self {
        self.tools.insert(tool.name(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DynTool>> {
        self.tools.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.keys().copied()
    }

    pub async fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs = Vec::with_capacity(self.tools.len());
        for tool in self.tools.values() {
            defs.push(tool.definition().await);
        }
        defs
    }

    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, ToolCallError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;
        tool.call_json(args).await
    }
}
