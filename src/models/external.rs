//! External book-metadata cache entry and API audit log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Entity;

/// Book metadata fetched from the upstream API, cached across runs
/// keyed by ISBN.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBookInfo {
    #[serde(default)]
    pub id: i32,
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub published_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub api_source: String,
    /// Raw upstream payload, kept verbatim
    #[serde(default)]
    pub raw_data: String,
    #[serde(default = "Utc::now")]
    pub cached_at: DateTime<Utc>,
}

impl Entity for ExternalBookInfo {
    const COLLECTION: &'static str = "ExternalBookInfo";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

/// Append-only audit trail entry, one per upstream call
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalApiLog {
    #[serde(default)]
    pub id: i32,
    pub api_name: String,
    pub endpoint: String,
    #[serde(default)]
    pub request_data: String,
    #[serde(default)]
    pub response_data: String,
    /// HTTP status of the upstream response; 0 when the call never
    /// reached the server
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub response_time_ms: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Entity for ExternalApiLog {
    const COLLECTION: &'static str = "ApiLogs";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
