//! Query request and SQL statement construction

use serde::{Deserialize, Serialize};

use super::table::QueryTable;

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 1000;
pub const DEFAULT_LIMIT: i64 = 100;

/// Caller-supplied fragments for one query
///
/// `where_clause`, `select_fields` and `order_by` are trusted and spliced
/// into the statement verbatim. The remote store is the authority on what
/// the caller may read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// WHERE clause without the keyword; omitted when absent or blank
    #[serde(default)]
    pub where_clause: Option<String>,
    /// Comma-separated field list, forwarded as given even when blank; the
    /// table default only when absent
    #[serde(default)]
    pub select_fields: Option<String>,
    /// ORDER BY clause without the keyword; the table default when absent or blank
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            where_clause: None,
            select_fields: None,
            order_by: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_where(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = Some(where_clause.into());
        self
    }

    pub fn with_select(mut self, select_fields: impl Into<String>) -> Self {
        self.select_fields = Some(select_fields.into());
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn effective_limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    /// Build `SELECT .. FROM .. [WHERE ..] ORDER BY .. LIMIT ..` for `table`
    pub fn to_sql(&self, table: QueryTable) -> String {
        let select_fields = self
            .select_fields
            .as_deref()
            .unwrap_or_else(|| table.default_select_fields());

        let mut sql = format!("SELECT {} FROM {}", select_fields, table.table_name());

        if let Some(where_clause) = non_blank(self.where_clause.as_deref()) {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }

        let order_by = non_blank(self.order_by.as_deref()).unwrap_or_else(|| table.default_order_by());
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);

        sql.push_str(&format!(" LIMIT {}", self.effective_limit()));
        sql
    }
}

/// Clamp a requested row limit into `[1, 1000]`
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
