//! Artifact and Tag Tools
//!
//! Artifacts are addressed by project, repository and a reference, which is
//! either a tag or a digest.

use serde::Deserialize;
use serde_json::Value;

use super::{json_result, parse_params};
use crate::harbor::models::{ArtifactQuery, PageQuery};
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{HarborTool, McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register artifact and tag tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(list_artifacts_tool());
    registry.register_tool(get_artifact_tool());
    registry.register_tool(delete_artifact_tool());
    registry.register_tool(list_tags_tool());
    registry.register_tool(create_tag_tool());
    registry.register_tool(delete_tag_tool());
}

#[derive(Debug, Deserialize)]
struct ArtifactParams {
    project_name: String,
    repository_name: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct TagParams {
    project_name: String,
    repository_name: String,
    reference: String,
    tag_name: String,
}

fn artifact_schema(extra: Option<(&str, &str)>) -> Value {
    let mut schema = serde_json::json!({
        "type": "object",
        "properties": {
            "project_name": {
                "type": "string",
                "description": "Project name"
            },
            "repository_name": {
                "type": "string",
                "description": "Repository name without the project prefix"
            },
            "reference": {
                "type": "string",
                "description": "Tag or digest of the artifact"
            }
        },
        "required": ["project_name", "repository_name", "reference"]
    });
    if let Some((field, description)) = extra {
        schema["properties"][field] = serde_json::json!({
            "type": "string",
            "description": description
        });
        if let Some(required) = schema["required"].as_array_mut() {
            required.push(Value::String(field.to_string()));
        }
    }
    schema
}

fn require_non_empty(field: &str, value: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(McpError::InvalidParams(format!("{} must not be empty", field)));
    }
    Ok(())
}

// ============================================================================
// list_artifacts
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListArtifactsParams {
    project_name: String,
    repository_name: String,
    #[serde(default = "default_with_tag")]
    with_tag: bool,
    page: Option<u32>,
    page_size: Option<u32>,
}

fn default_with_tag() -> bool {
    true
}

fn list_artifacts_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::ListArtifacts)
        .description("List artifacts (images, charts, ...) in a repository")
        .input_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "project_name": {
                    "type": "string",
                    "description": "Project name"
                },
                "repository_name": {
                    "type": "string",
                    "description": "Repository name without the project prefix"
                },
                "with_tag": {
                    "type": "boolean",
                    "description": "Include tags of each artifact (default true)"
                },
                "page": {
                    "type": "integer",
                    "description": "Page number, starting at 1",
                    "minimum": 1
                },
                "page_size": {
                    "type": "integer",
                    "description": "Results per page (default 10)",
                    "minimum": 1,
                    "maximum": 100
                }
            },
            "required": ["project_name", "repository_name"]
        }))
        .build(list_artifacts_handler)
}

async fn list_artifacts_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListArtifactsParams = parse_params(params)?;
    let query = ArtifactQuery {
        with_tag: params.with_tag,
        page: PageQuery::new(params.page, params.page_size),
    };
    let artifacts = ctx
        .harbor
        .list_artifacts(&params.project_name, &params.repository_name, &query)
        .await?;
    json_result(&artifacts)
}

// ============================================================================
// get_artifact / delete_artifact
// ============================================================================

fn get_artifact_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::GetArtifact)
        .description("Get details of an artifact by tag or digest")
        .input_schema(artifact_schema(None))
        .build(get_artifact_handler)
}

async fn get_artifact_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ArtifactParams = parse_params(params)?;
    let artifact = ctx
        .harbor
        .get_artifact(
            &params.project_name,
            &params.repository_name,
            &params.reference,
        )
        .await?;
    json_result(&artifact)
}

fn delete_artifact_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::DeleteArtifact)
        .description("Delete an artifact by tag or digest, removing all of its tags")
        .input_schema(artifact_schema(None))
        .build(delete_artifact_handler)
}

async fn delete_artifact_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ArtifactParams = parse_params(params)?;
    require_non_empty("reference", &params.reference)?;
    ctx.harbor
        .delete_artifact(
            &params.project_name,
            &params.repository_name,
            &params.reference,
        )
        .await?;
    Ok(ToolsCallResult::text(format!(
        "Artifact '{}/{}@{}' deleted",
        params.project_name, params.repository_name, params.reference
    )))
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListTagsParams {
    project_name: String,
    repository_name: String,
    reference: String,
    page: Option<u32>,
    page_size: Option<u32>,
}

fn list_tags_tool() -> RegisteredTool {
    let mut schema = artifact_schema(None);
    schema["properties"]["page"] = serde_json::json!({
        "type": "integer",
        "description": "Page number, starting at 1",
        "minimum": 1
    });
    schema["properties"]["page_size"] = serde_json::json!({
        "type": "integer",
        "description": "Results per page (default 10)",
        "minimum": 1,
        "maximum": 100
    });

    ToolBuilder::new(HarborTool::ListTags)
        .description("List the tags of an artifact")
        .input_schema(schema)
        .build(list_tags_handler)
}

async fn list_tags_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListTagsParams = parse_params(params)?;
    let tags = ctx
        .harbor
        .list_tags(
            &params.project_name,
            &params.repository_name,
            &params.reference,
            PageQuery::new(params.page, params.page_size),
        )
        .await?;
    json_result(&tags)
}

fn create_tag_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::CreateTag)
        .description("Add a tag to an existing artifact")
        .input_schema(artifact_schema(Some(("tag_name", "Tag to create"))))
        .build(create_tag_handler)
}

async fn create_tag_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TagParams = parse_params(params)?;
    require_non_empty("tag_name", &params.tag_name)?;
    ctx.harbor
        .create_tag(
            &params.project_name,
            &params.repository_name,
            &params.reference,
            &params.tag_name,
        )
        .await?;
    Ok(ToolsCallResult::text(format!(
        "Tag '{}' added to '{}/{}@{}'",
        params.tag_name, params.project_name, params.repository_name, params.reference
    )))
}

fn delete_tag_tool() -> RegisteredTool {
    ToolBuilder::new(HarborTool::DeleteTag)
        .description("Remove a tag from an artifact. The artifact itself is kept")
        .input_schema(artifact_schema(Some(("tag_name", "Tag to delete"))))
        .build(delete_tag_handler)
}

async fn delete_tag_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TagParams = parse_params(params)?;
    require_non_empty("tag_name", &params.tag_name)?;
    ctx.harbor
        .delete_tag(
            &params.project_name,
            &params.repository_name,
            &params.reference,
            &params.tag_name,
        )
        .await?;
    Ok(ToolsCallResult::text(format!(
        "Tag '{}' deleted from '{}/{}'",
        params.tag_name, params.project_name, params.repository_name
    )))
}
