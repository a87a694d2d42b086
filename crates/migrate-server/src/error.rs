//! Tool failure classification.

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use serde::Serialize;
use thiserror::Error;

/// Failure while running a tool.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Failure from the analysis crates.
    #[error(transparent)]
    Core(#[from] glide_migrate_core::Error),

    /// A blocking file task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ToolError {
    /// Returns `true` if the caller can fix the failure by changing the
    /// arguments.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_caller_error())
    }
}

/// Converts a tool outcome into a protocol response.
///
/// Success becomes structured content. Caller errors become a structured
/// error payload `{ "error": ... }`. Everything else, including fetch and
/// I/O failures, becomes an internal protocol error.
///
/// # Errors
///
/// Returns [`McpError`] for non-caller failures or if the value cannot be
/// serialized.
pub fn respond<T: Serialize>(outcome: Result<T, ToolError>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => {
            let value = serde_json::to_value(&value).map_err(|e| {
                McpError::internal_error(format!("Failed to serialize result: {e}"), None)
            })?;
            Ok(CallToolResult::structured(value))
        }
        Err(e) if e.is_caller_error() => {
            tracing::debug!(error = %e, "rejected tool arguments");
            Ok(CallToolResult::structured_error(
                serde_json::json!({ "error": e.to_string() }),
            ))
        }
        Err(e) => {
            tracing::warn!(error = %e, "tool failed");
            Err(McpError::internal_error(e.to_string(), None))
        }
    }
}
