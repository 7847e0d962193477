pub mod error;
pub mod tool;
pub mod util;

pub use error::ToolCallError;
pub use tool::{DynTool, Tool, ToolDefinition, ToolSet, ToolWrapper};
pub use util::truncate_to_char_boundary;
