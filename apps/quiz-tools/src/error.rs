//! Error handling for the command-line tools

use thiserror::Error;

/// Errors that end the process with a specific exit status.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Could not load questions: {0}")]
    Load(String),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Usage(_) => 2,
            ToolError::Load(_) => 1,
        }
    }
}
