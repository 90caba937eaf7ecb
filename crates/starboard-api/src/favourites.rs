use axum::{Json, body::Bytes, http::StatusCode, response::{IntoResponse, Response}};
use tracing::info;

use starboard_types::api::{AddFavouriteRequest, FavouriteResponse, UpdateFavouriteRequest};

use crate::auth::{AppState, with_db};
use crate::error::{ApiError, Result};
use crate::router::parse_body;

/// Every favourites operation is scoped to an existing user.
async fn ensure_user_exists(state: &AppState, user_id: &str) -> Result<()> {
    let uid = user_id.to_string();
    match with_db(state, move |db| db.get_user_by_id(&uid)).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ApiError::NotFound("user not found".into())),
        Err(e) => Err(e.context("failed to verify user")),
    }
}

/// GET /users/{id}/favourites
pub async fn list_favourites(state: &AppState, user_id: String) -> Result<Response> {
    ensure_user_exists(state, &user_id).await?;

    let favs = with_db(state, move |db| db.get_user_favourites(&user_id)).await?;
    Ok(Json(favs).into_response())
}

/// POST /users/{id}/favourites — add, or overwrite the description of an existing favourite.
pub async fn add_favourite(state: &AppState, user_id: String, body: &Bytes) -> Result<Response> {
    ensure_user_exists(state, &user_id).await?;

    let req: AddFavouriteRequest = parse_body(body)?;
    if req.asset_id.is_empty() {
        return Err(ApiError::Validation("asset_id is required".into()));
    }

    let (uid, aid, desc) = (user_id.clone(), req.asset_id.clone(), req.description.clone());
    with_db(state, move |db| db.add_favourite(&uid, &aid, desc.as_deref()))
        .await
        .map_err(|e| e.context("Failed to add favourite"))?;

    info!("User {} favourited asset {}", user_id, req.asset_id);
    Ok((
        StatusCode::CREATED,
        Json(FavouriteResponse {
            user_id,
            asset_id: req.asset_id,
            description: req.description,
            message: "Favourite added successfully".into(),
        }),
    )
        .into_response())
}

/// PATCH /users/{id}/favourites/{asset_id}
pub async fn update_favourite(
    state: &AppState,
    user_id: String,
    asset_id: String,
    body: &Bytes,
) -> Result<Response> {
    ensure_user_exists(state, &user_id).await?;

    let req: UpdateFavouriteRequest = parse_body(body)?;

    let (uid, aid, desc) = (user_id.clone(), asset_id.clone(), req.description.clone());
    with_db(state, move |db| db.update_favourite_description(&uid, &aid, desc.as_deref())).await?;

    Ok(Json(FavouriteResponse {
        user_id,
        asset_id,
        description: req.description,
        message: "Favourite updated successfully".into(),
    })
    .into_response())
}

/// DELETE /users/{id}/favourites/{asset_id}
pub async fn remove_favourite(state: &AppState, user_id: String, asset_id: String) -> Result<Response> {
    ensure_user_exists(state, &user_id).await?;

    let (uid, aid) = (user_id.clone(), asset_id.clone());
    with_db(state, move |db| db.remove_favourite(&uid, &aid)).await?;

    info!("User {} removed favourite {}", user_id, asset_id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
