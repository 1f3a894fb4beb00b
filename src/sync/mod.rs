pub mod paginate;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::Reporter;
use crate::config::ActionConfig;
use crate::error::SyncError;
use crate::model::project::{
    Connection, Field, FieldDataType, FieldValue, Issue, Project, ProjectItem, Reaction,
};
use crate::project_url::ProjectUrl;
use crate::providers::queries::{
    ISSUE_REACTIONS_QUERY, PROJECT_FIELDS_QUERY, PROJECT_ITEMS_QUERY, UPDATE_FIELD_MUTATION,
};
use crate::providers::GraphqlClient;
use paginate::{collect_pages, connection_at};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub items: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub updated: usize,
}

/// Run one sync and report the outcome. Returns whether the job succeeded.
///
/// Any error stops the run; mutations issued before it are not rolled back.
pub async fn run(
    config: &ActionConfig,
    client: &dyn GraphqlClient,
    reporter: &dyn Reporter,
) -> bool {
    let outcome = match sync(&config.project_url, &config.field_name, client, reporter).await {
        Ok(report) => {
            tracing::info!(
                "Synced {} items: {} updated, {} unchanged, {} without an issue",
                report.items,
                report.updated,
                report.unchanged,
                report.skipped
            );
            reporter
                .set_output("status", "success")
                .map_err(|e| format!("{e:#}"))
        }
        Err(err) => Err(err.to_string()),
    };

    match outcome {
        Ok(()) => true,
        Err(message) => {
            tracing::error!("Reaction sync failed: {message}");
            reporter.set_failed(&message);
            false
        }
    }
}

pub async fn sync(
    project_url: &str,
    field_name: &str,
    client: &dyn GraphqlClient,
    reporter: &dyn Reporter,
) -> Result<SyncReport, SyncError> {
    let url = ProjectUrl::parse(project_url)?;
    tracing::info!(
        "Counting reactions for project {}/{}#{}",
        url.org,
        url.repo,
        url.number
    );

    let project = fetch_project(client, reporter, &url).await?;
    let field = resolve_field(&project, field_name)?;
    if field.data_type != FieldDataType::Number {
        tracing::warn!(
            "Field \"{}\" is a {:?} field, not a number field; updates may be rejected",
            field.name,
            field.data_type
        );
    }
    let items = collect_items(client, &project.id).await?;
    tracing::info!("Project has {} items", items.len());

    reconcile(client, &project.id, field, &items).await
}

#[derive(Deserialize)]
struct ProjectPage {
    id: String,
    fields: Connection<Field>,
}

/// Fetch the project id together with every field definition.
pub async fn fetch_project(
    client: &dyn GraphqlClient,
    reporter: &dyn Reporter,
    url: &ProjectUrl,
) -> Result<Project, SyncError> {
    let mut project_id: Option<String> = None;

    let fields = collect_pages(
        client,
        PROJECT_FIELDS_QUERY,
        json!({ "org": url.org, "repo": url.repo, "number": url.number }),
        None,
        |data: Value| {
            reporter.debug(&format!(
                "Project response: {}",
                serde_json::to_string_pretty(&data).unwrap_or_default()
            ));
            let project = match data.pointer("/repository/projectV2") {
                Some(project) if !project.is_null() => project.clone(),
                _ => return Err(SyncError::ProjectNotFound(data.to_string())),
            };
            let page: ProjectPage = serde_json::from_value(project)?;
            project_id.get_or_insert(page.id);
            Ok(page.fields)
        },
    )
    .await?;

    let id = project_id.ok_or_else(|| SyncError::ProjectNotFound("null".into()))?;
    tracing::debug!("Project {id} has {} fields", fields.len());
    Ok(Project { id, fields })
}

pub fn resolve_field<'a>(project: &'a Project, field_name: &str) -> Result<&'a Field, SyncError> {
    project
        .field_named(field_name)
        .ok_or_else(|| SyncError::FieldNotFound(field_name.to_string()))
}

pub async fn collect_items(
    client: &dyn GraphqlClient,
    project_id: &str,
) -> Result<Vec<ProjectItem>, SyncError> {
    collect_pages(
        client,
        PROJECT_ITEMS_QUERY,
        json!({ "projectId": project_id }),
        None,
        |data| connection_at(data, "/node/items"),
    )
    .await
}

/// All reactions on an issue, continuing from the page embedded in the item.
pub async fn aggregate_reactions(
    client: &dyn GraphqlClient,
    issue: &Issue,
) -> Result<Vec<Reaction>, SyncError> {
    collect_pages(
        client,
        ISSUE_REACTIONS_QUERY,
        json!({ "issueId": issue.id }),
        Some(issue.reactions.clone()),
        |data| connection_at(data, "/node/reactions"),
    )
    .await
}

pub async fn reconcile(
    client: &dyn GraphqlClient,
    project_id: &str,
    field: &Field,
    items: &[ProjectItem],
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport {
        items: items.len(),
        ..SyncReport::default()
    };

    for item in items {
        let Some(issue) = item.issue() else {
            tracing::debug!("Skipping item {}: no linked issue", item.id);
            report.skipped += 1;
            continue;
        };

        let reactions = aggregate_reactions(client, issue).await?;
        tracing::debug!(
            "Issue #{} reactions: {:?}",
            issue.number,
            reactions.iter().map(|r| r.content.as_str()).collect::<Vec<_>>()
        );
        let count = reactions.len() as f64;
        let current = item.value_for(&field.name).and_then(FieldValue::number);
        if current == Some(count) {
            report.unchanged += 1;
            continue;
        }

        tracing::info!(
            "Issue #{}: {} -> {} reactions",
            issue.number,
            current.map_or_else(|| "unset".to_string(), |v| v.to_string()),
            count
        );
        update_field(client, project_id, &item.id, &field.id, count).await?;
        report.updated += 1;
    }

    Ok(report)
}

async fn update_field(
    client: &dyn GraphqlClient,
    project_id: &str,
    item_id: &str,
    field_id: &str,
    value: f64,
) -> Result<(), SyncError> {
    client
        .execute(
            UPDATE_FIELD_MUTATION,
            json!({
                "projectId": project_id,
                "itemId": item_id,
                "fieldId": field_id,
                "value": value,
            }),
        )
        .await?;
    Ok(())
}
