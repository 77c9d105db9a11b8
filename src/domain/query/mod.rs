//! Query contract for the GDELT Cloud analytical store

mod request;
mod result;
mod table;

pub use request::{clamp_limit, QueryRequest, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use result::{QueryResult, Row};
pub use table::QueryTable;
