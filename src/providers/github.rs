use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{GraphqlClient, GraphqlError};

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("reactions-counter/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    token: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(token: String, endpoint: String) -> Self {
        Self {
            token,
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct GqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Turn a raw GraphQL HTTP response into its `data` member.
pub(crate) fn parse_response(status: u16, body: &[u8]) -> Result<Value, GraphqlError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(GraphqlError::Status { status, message });
    }

    let gql: GqlResponse = serde_json::from_slice(body).map_err(|e| GraphqlError::Status {
        status,
        message: format!("Failed to parse GraphQL response: {e}"),
    })?;

    if !gql.errors.is_empty() {
        return Err(GraphqlError::Response(
            gql.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    match gql.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(GraphqlError::MissingData),
    }
}

#[async_trait]
impl GraphqlClient for GitHubClient {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, GraphqlError> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        let result = parse_response(status, &bytes);
        if let Err(GraphqlError::Status { status, .. }) = &result {
            tracing::warn!("GraphQL endpoint {} answered HTTP {status}", self.endpoint);
        }
        result
    }
}
