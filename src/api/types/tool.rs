//! Tool call and listing payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::query::{QueryResult, Row, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use crate::domain::QueryTable;

/// Body returned by a query tool
///
/// Remote failures are data, not HTTP errors: they come back with status
/// 200 and only an `error` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Failure {
        error: String,
    },
    Success {
        data: Vec<Row>,
        count: u64,
        execution_time: Option<f64>,
    },
}

impl From<QueryResult> for ToolResponse {
    fn from(result: QueryResult) -> Self {
        match result.error {
            Some(error) => Self::Failure { error },
            None => Self::Success {
                data: result.data,
                count: result.count,
                execution_time: result.execution_time,
            },
        }
    }
}

/// Entry in `GET /tools`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDescriptor>,
}

impl ToolDescriptor {
    pub fn for_table(table: QueryTable) -> Self {
        let (description, where_example) = match table {
            QueryTable::Events => (
                "Query GDELT events (who did what to whom, when and where). \
                 Uses the caller's credential for access control.",
                "day >= '2024-01-01' AND actor1_country_code = 'USA'",
            ),
            QueryTable::Gkg => (
                "Query the GDELT Global Knowledge Graph (themes, people, \
                 organizations and tone in news coverage).",
                "date >= '2024-01-01' AND v2_themes LIKE '%PROTEST%'",
            ),
        };

        Self {
            name: tool_name(table).to_string(),
            description: description.to_string(),
            tags: vec![
                "query".to_string(),
                "gdelt".to_string(),
                table.to_string(),
            ],
            parameters: serde_json::json!({
                "where_clause": {
                    "type": "string",
                    "required": false,
                    "description": "SQL WHERE clause without the keyword",
                    "example": where_example,
                },
                "select_fields": {
                    "type": "string",
                    "required": false,
                    "default": table.default_select_fields(),
                },
                "order_by": {
                    "type": "string",
                    "required": false,
                    "default": table.default_order_by(),
                },
                "limit": {
                    "type": "integer",
                    "required": false,
                    "default": DEFAULT_LIMIT,
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                },
            }),
        }
    }
}

pub fn tool_name(table: QueryTable) -> &'static str {
    match table {
        QueryTable::Events => "query_gdelt_events",
        QueryTable::Gkg => "query_gdelt_gkg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_keeps_null_execution_time() {
        let body = ToolResponse::from(QueryResult::success(vec![Row::new()], 1, None));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["count"], 1);
        assert!(json["execution_time"].is_null());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_body_has_only_error() {
        let body = ToolResponse::from(QueryResult::failure("HTTP 500: boom"));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({"error": "HTTP 500: boom"}));
    }

    #[test]
    fn test_descriptor_defaults() {
        let gkg = ToolDescriptor::for_table(QueryTable::Gkg);

        assert_eq!(gkg.name, "query_gdelt_gkg");
        assert_eq!(gkg.parameters["order_by"]["default"], "date DESC");
        assert_eq!(gkg.parameters["limit"]["maximum"], 1000);
        assert!(gkg.tags.contains(&"gdelt_gkg".to_string()));
    }
}
