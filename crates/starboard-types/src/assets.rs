//! Asset payloads.
//!
//! An asset is stored as a type tag plus a raw JSON blob. The tag decides
//! which of the payload shapes below the blob is decoded into. Decoding is
//! lenient about missing fields (they take their zero value) but strict
//! about malformed JSON and wrongly typed fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Chart,
    Insight,
    Audience,
}

impl AssetType {
    pub const ALL: [AssetType; 3] = [AssetType::Chart, AssetType::Insight, AssetType::Audience];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Insight => "insight",
            Self::Audience => "audience",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(Self::Chart),
            "insight" => Ok(Self::Insight),
            "audience" => Ok(Self::Audience),
            other => Err(CodecError::UnknownAssetType(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown asset type: {0}")]
    UnknownAssetType(String),

    #[error("failed to decode {asset_type} data: {source}")]
    Decode {
        asset_type: AssetType,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chart {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub data_points: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Audience {
    pub gender: String,
    pub birth_country: String,
    pub age_groups: Vec<String>,
    pub hours_on_social_media_min: i64,
    pub purchases_last_month_min: i64,
}

/// Decoded asset payload. Serializes as the bare shape, without a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetData {
    Chart(Chart),
    Insight(Insight),
    Audience(Audience),
}

impl AssetData {
    pub fn decode(asset_type: AssetType, raw: &[u8]) -> Result<Self, CodecError> {
        let wrap = |source: serde_json::Error| CodecError::Decode { asset_type, source };
        match asset_type {
            AssetType::Chart => serde_json::from_slice(raw).map(Self::Chart).map_err(wrap),
            AssetType::Insight => serde_json::from_slice(raw).map(Self::Insight).map_err(wrap),
            AssetType::Audience => serde_json::from_slice(raw).map(Self::Audience).map_err(wrap),
        }
    }

    pub fn asset_type(&self) -> AssetType {
        match self {
            Self::Chart(_) => AssetType::Chart,
            Self::Insight(_) => AssetType::Insight,
            Self::Audience(_) => AssetType::Audience,
        }
    }
}

/// Decode a payload whose tag comes straight from storage.
pub fn decode_asset_data(tag: &str, raw: &[u8]) -> Result<AssetData, CodecError> {
    let asset_type: AssetType = tag.parse()?;
    AssetData::decode(asset_type, raw)
}
