//! Borrower (library member) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,
    /// Unique membership identifier, compared case-insensitively
    #[serde(default)]
    pub membership_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "Utc::now")]
    pub membership_start_date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub membership_expiry_date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Borrower {
    const COLLECTION: &'static str = "Borrowers";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}
