use axum::{Json, body::Bytes, http::StatusCode, response::{IntoResponse, Response}};
use uuid::Uuid;

use starboard_types::api::{CreateUserRequest, UserCreatedResponse};
use starboard_types::models::User;

use crate::auth::{AppState, with_db};
use crate::convert::user_from_row;
use crate::error::{ApiError, Result};
use crate::router::parse_body;

/// POST /users — create a user without a password.
pub async fn create_user(state: &AppState, body: &Bytes) -> Result<Response> {
    let req: CreateUserRequest = parse_body(body)?;

    if req.name.is_empty() {
        return Err(ApiError::Validation("Name is required".into()));
    }

    let id = req
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (uid, name) = (id.clone(), req.name.clone());
    let id = with_db(state, move |db| db.create_user(&uid, &name, None))
        .await
        .map_err(|e| e.context("Failed to create user"))?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse { id, name: req.name }),
    )
        .into_response())
}

/// GET /users — all users, ordered by id.
pub async fn list_users(state: &AppState) -> Result<Response> {
    let rows = with_db(state, |db| db.list_users())
        .await
        .map_err(|e| e.context("Failed to fetch users"))?;

    let users: Vec<User> = rows.into_iter().map(user_from_row).collect();
    Ok(Json(users).into_response())
}

/// GET /users/{id}
pub async fn get_user(state: &AppState, user_id: String) -> Result<Response> {
    let row = with_db(state, move |db| db.get_user_by_id(&user_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;

    Ok(Json(user_from_row(row)).into_response())
}
