//! HTTP payload types

pub mod error;
pub mod json;
pub mod tool;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use tool::{tool_name, ToolDescriptor, ToolResponse, ToolsResponse};
