use axum::{Json, body::Bytes, http::StatusCode, response::{IntoResponse, Response}};
use tracing::info;

use starboard_types::AssetType;
use starboard_types::api::CreateAssetRequest;
use starboard_types::models::Asset;

use crate::auth::{AppState, with_db};
use crate::convert::asset_from_row;
use crate::error::{ApiError, Result};
use crate::router::parse_body;

/// POST /assets — store an asset; the payload is kept as raw JSON.
pub async fn create_asset(state: &AppState, body: &Bytes) -> Result<Response> {
    let req: CreateAssetRequest = parse_body(body)?;

    if req.title.is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }
    if req.asset_type.is_empty() {
        return Err(ApiError::Validation(
            "Type is required (chart, insight, or audience)".into(),
        ));
    }
    let asset_type: AssetType = req.asset_type.parse().map_err(|_| {
        ApiError::Validation(format!(
            "Invalid type '{}' (chart, insight, or audience)",
            req.asset_type
        ))
    })?;

    let data = req
        .data
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
        .to_string();
    let title = req.title;
    let description = req.description;

    let row = with_db(state, move |db| {
        let id = db.create_asset(asset_type.as_str(), Some(&title), description.as_deref(), &data)?;
        db.get_asset_by_id(&id)
    })
    .await
    .map_err(|e| e.context("Failed to create asset"))?
    .ok_or_else(|| ApiError::Internal("created asset vanished".into()))?;

    let asset = asset_from_row(row)?;
    info!("Asset {} ({}) created", asset.id, asset.asset_type);
    Ok((StatusCode::CREATED, Json(asset)).into_response())
}

/// GET /assets/{id} — the stored record, payload undecoded.
pub async fn get_asset(state: &AppState, asset_id: String) -> Result<Response> {
    let row = with_db(state, move |db| db.get_asset_by_id(&asset_id))
        .await
        .map_err(|e| e.context("Failed to get asset"))?
        .ok_or_else(|| ApiError::NotFound("Asset not found".into()))?;

    Ok(Json(asset_from_row(row)?).into_response())
}

/// GET /assets
pub async fn list_assets(state: &AppState) -> Result<Response> {
    let rows = with_db(state, |db| db.list_assets())
        .await
        .map_err(|e| e.context("Failed to fetch assets"))?;

    let assets = rows
        .into_iter()
        .map(asset_from_row)
        .collect::<Result<Vec<Asset>>>()?;
    Ok(Json(assets).into_response())
}
