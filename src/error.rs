use thiserror::Error;

use crate::providers::GraphqlError;

pub const INVALID_PROJECT_URL: &str =
    "Invalid project URL format. Expected: https://github.com/org/repo/projects/number";

/// Everything that can stop a sync run. The message is what the workflow shows.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to get project data. Response: {0}")]
    ProjectNotFound(String),

    #[error("Field \"{0}\" not found in project")]
    FieldNotFound(String),

    #[error(transparent)]
    Transport(#[from] GraphqlError),

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl SyncError {
    pub fn invalid_project_url() -> Self {
        SyncError::InvalidInput(INVALID_PROJECT_URL.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::MalformedResponse(err.to_string())
    }
}
