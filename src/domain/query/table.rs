use serde::{Deserialize, Serialize};

/// Tables reachable through the query tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryTable {
    /// Structured CAMEO events
    Events,
    /// Global Knowledge Graph article records
    Gkg,
}

impl QueryTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Events => "gdelt_events",
            Self::Gkg => "gdelt_gkg",
        }
    }

    /// Ordering applied when the caller gives none
    pub fn default_order_by(&self) -> &'static str {
        match self {
            Self::Events => "day DESC",
            Self::Gkg => "date DESC",
        }
    }

    pub fn default_select_fields(&self) -> &'static str {
        match self {
            Self::Events => {
                "global_event_id, day, actor1_name, actor2_name, event_code, goldstein_scale, avg_tone, action_geo_country_code"
            }
            Self::Gkg => {
                "gkg_record_id, date, source_common_name, document_identifier, v2_themes, v1_5_tone"
            }
        }
    }
}

impl std::fmt::Display for QueryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}
