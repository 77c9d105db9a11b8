//! Query command - one query outside any inbound request

use clap::{Args, ValueEnum};
use tracing::info;

use crate::api::types::ToolResponse;
use crate::config::AppConfig;
use crate::domain::auth::redacted_prefix;
use crate::domain::{AuthContext, QueryRequest, QueryTable};
use crate::infrastructure::gdelt::forward_query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Events,
    Gkg,
}

impl From<TableArg> for QueryTable {
    fn from(table: TableArg) -> Self {
        match table {
            TableArg::Events => QueryTable::Events,
            TableArg::Gkg => QueryTable::Gkg,
        }
    }
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Table to query
    #[arg(value_enum)]
    pub table: TableArg,

    /// WHERE clause without the keyword
    #[arg(long = "where")]
    pub where_clause: Option<String>,

    /// Comma-separated fields to select
    #[arg(long = "select")]
    pub select_fields: Option<String>,

    /// ORDER BY clause without the keyword
    #[arg(long)]
    pub order_by: Option<String>,

    /// Maximum rows, clamped to 1..=1000
    #[arg(long, default_value_t = crate::domain::query::DEFAULT_LIMIT)]
    pub limit: i64,
}

impl QueryArgs {
    pub fn to_request(&self) -> QueryRequest {
        QueryRequest {
            where_clause: self.where_clause.clone(),
            select_fields: self.select_fields.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
        }
    }
}

/// Run the query and print the result as pretty JSON
pub async fn run(args: QueryArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let response = execute(&args, &config).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Authenticate with the fallback credential and forward the query
///
/// Authentication failures are returned as errors. Store failures are part
/// of the response.
pub async fn execute(args: &QueryArgs, config: &AppConfig) -> anyhow::Result<ToolResponse> {
    let verifier = crate::create_verifier(config)?;
    let context = AuthContext::resolve(None, &config.auth.fallback_credentials());
    let token = context.require_auth()?;
    let identity = verifier.verify(token).await?;

    let table = QueryTable::from(args.table);
    info!(
        table = %table,
        kind = %identity.kind(),
        token_prefix = %redacted_prefix(token),
        "Running query"
    );

    let result = forward_query(
        &config.gdelt.client_config(),
        identity.token(),
        table,
        &args.to_request(),
    )
    .await;

    Ok(result.into())
}
