use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::SyncError;
use crate::model::project::{Connection, PageInfo};
use crate::providers::GraphqlClient;

/// Fetch every page of a connection, one request at a time.
///
/// `extract` pulls the connection out of each response. When `first_page` is
/// given its nodes are kept and fetching resumes from its cursor; a first page
/// without a next page costs no request at all. The query must take a
/// `$cursor: String` variable.
pub async fn collect_pages<T, F>(
    client: &dyn GraphqlClient,
    query: &str,
    variables: Value,
    first_page: Option<Connection<T>>,
    mut extract: F,
) -> Result<Vec<T>, SyncError>
where
    F: FnMut(Value) -> Result<Connection<T>, SyncError>,
{
    let mut nodes = Vec::new();
    let mut cursor = None;

    if let Some(page) = first_page {
        nodes.extend(page.nodes);
        match next_cursor(page.page_info)? {
            Some(next) => cursor = Some(next),
            None => return Ok(nodes),
        }
    }

    loop {
        let mut vars = variables.clone();
        vars["cursor"] = json!(cursor);

        let data = client.execute(query, vars).await?;
        let page = extract(data)?;
        tracing::debug!(
            "Fetched page of {} nodes (has next page: {})",
            page.nodes.len(),
            page.page_info.has_next_page
        );

        nodes.extend(page.nodes);
        match next_cursor(page.page_info)? {
            Some(next) => cursor = Some(next),
            None => return Ok(nodes),
        }
    }
}

fn next_cursor(info: PageInfo) -> Result<Option<String>, SyncError> {
    if !info.has_next_page {
        return Ok(None);
    }
    info.end_cursor.map(Some).ok_or_else(|| {
        SyncError::MalformedResponse("hasNextPage is set but endCursor is missing".into())
    })
}

/// Deserialize the connection found at a JSON pointer, e.g. `/node/items`.
pub fn connection_at<T: DeserializeOwned>(
    mut data: Value,
    pointer: &str,
) -> Result<Connection<T>, SyncError> {
    match data.pointer_mut(pointer).map(Value::take) {
        Some(conn) if !conn.is_null() => Ok(serde_json::from_value(conn)?),
        _ => Err(SyncError::MalformedResponse(format!(
            "missing {pointer} in response"
        ))),
    }
}
