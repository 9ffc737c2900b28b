use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub asset_type: String,

    #[serde(default)]
    pub description: String,

    pub value: f64,

    #[serde(default)]
    pub metadata: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferAssetRequest {
    #[validate(length(min = 8, message = "Recipient address must be at least 8 characters"))]
    pub recipient_address: String,
}
