//! Asset model for the per-user ownership ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tokenized asset owned by exactly one user at a time.
///
/// `owner_id` is the subject claim of the identity service's session
/// token. This service only ever compares it for equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub description: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,
    pub token_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Mints a token reference and stamps the creation time.
    pub fn new(owner_id: String, input: CreateAsset) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: input.name,
            asset_type: input.asset_type,
            description: input.description,
            value: input.value,
            metadata: input.metadata,
            token_id: format!("token_{}", Uuid::new_v4().simple()),
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Input for creating a new asset.
#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub value: f64,
    pub metadata: String,
}
