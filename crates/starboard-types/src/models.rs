use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets::{AssetData, AssetType};

/// A user as exposed to clients. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A stored asset with its payload left undecoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub title: Option<String>,
    pub description: Option<String>,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Join of a favourite with its asset, payload decoded by type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavouriteAsset {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub title: Option<String>,
    pub data: AssetData,
    pub description: Option<String>,
}
