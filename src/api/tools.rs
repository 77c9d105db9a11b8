//! Query tool endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use tracing::{info, warn};

use super::middleware::RequireCredential;
use super::state::AppState;
use super::types::{Json, ToolDescriptor, ToolResponse, ToolsResponse};
use crate::domain::{QueryRequest, QueryTable, VerifiedIdentity};
use crate::infrastructure::gdelt::forward_query;

pub fn create_tools_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tools))
        .route("/query_gdelt_events", post(query_gdelt_events))
        .route("/query_gdelt_gkg", post(query_gdelt_gkg))
}

/// GET /tools
pub async fn list_tools() -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: vec![
            ToolDescriptor::for_table(QueryTable::Events),
            ToolDescriptor::for_table(QueryTable::Gkg),
        ],
    })
}

/// POST /tools/query_gdelt_events
pub async fn query_gdelt_events(
    State(state): State<AppState>,
    RequireCredential(identity): RequireCredential,
    Json(request): Json<QueryRequest>,
) -> Json<ToolResponse> {
    run_query(&state, &identity, QueryTable::Events, &request).await
}

/// POST /tools/query_gdelt_gkg
pub async fn query_gdelt_gkg(
    State(state): State<AppState>,
    RequireCredential(identity): RequireCredential,
    Json(request): Json<QueryRequest>,
) -> Json<ToolResponse> {
    run_query(&state, &identity, QueryTable::Gkg, &request).await
}

async fn run_query(
    state: &AppState,
    identity: &VerifiedIdentity,
    table: QueryTable,
    request: &QueryRequest,
) -> Json<ToolResponse> {
    info!(
        table = %table,
        kind = %identity.kind(),
        subject = %identity.subject(),
        limit = request.effective_limit(),
        "Forwarding query"
    );

    let result = forward_query(&state.gdelt, identity.token(), table, request).await;

    match &result.error {
        Some(error) => warn!(table = %table, error = %error, "Query failed"),
        None => info!(table = %table, count = result.count, "Query completed"),
    }

    Json(result.into())
}
