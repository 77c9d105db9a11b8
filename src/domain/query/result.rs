use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row as returned by the store
pub type Row = Map<String, Value>;

/// Outcome of a forwarded query
///
/// `error` and `data` are exclusive: when `error` is set the rows are empty
/// and must be ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: Vec<Row>,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    pub fn success(data: Vec<Row>, count: u64, execution_time: Option<f64>) -> Self {
        Self {
            data,
            count,
            execution_time,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            count: 0,
            execution_time: None,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
