pub mod github;
pub mod queries;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphqlError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    /// The server answered but reported errors for the document.
    #[error("{}", .0.join("\n"))]
    Response(Vec<String>),

    #[error("GraphQL response contained no data")]
    MissingData,
}

/// Executes GraphQL documents against the GitHub API.
///
/// Returns the `data` member of the response; transport failures and
/// GraphQL-level errors both surface as `GraphqlError`.
#[async_trait]
pub trait GraphqlClient: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, GraphqlError>;
}
