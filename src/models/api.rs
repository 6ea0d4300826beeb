use serde::{Deserialize, Serialize};

use crate::core::error::FieldError;
use crate::models::card::bool_string;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// POST /api/cards/{id}/status
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStatusRequest {
    #[serde(deserialize_with = "bool_string::deserialize")]
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStatusResponse {
    pub success: bool,
    pub card_id: u32,
    #[serde(serialize_with = "bool_string::serialize")]
    pub is_active: bool,
}
