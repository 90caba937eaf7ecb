use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info, warn};

use starboard_db::Database;
use starboard_types::api::{LoginRequest, LoginResponse, RegisterRequest, UserCreatedResponse};

use crate::config::AuthConfig;
use crate::credentials::{TokenService, hash_password, verify_password};
use crate::error::{ApiError, Result};
use crate::middleware::AuthGate;

const MIN_PASSWORD_LEN: usize = 6;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenService,
    pub gate: AuthGate,
}

impl AppStateInner {
    pub fn new(db: Database, auth: &AuthConfig) -> AppState {
        Arc::new(Self {
            db,
            tokens: TokenService::new(auth),
            gate: AuthGate::new(auth),
        })
    }
}

/// Run a blocking DB call off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T>
where
    F: FnOnce(&Database) -> starboard_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal("internal error".into())
        })?
        .map_err(ApiError::from)
}

async fn off_runtime<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal("internal error".into())
    })
}

pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|_| ApiError::invalid_body())?;

    // Validate input
    if req.id.is_empty() || req.name.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("ID, name, and password required".into()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let password = req.password;
    let password_hash = off_runtime(move || hash_password(&password))
        .await?
        .map_err(|e| {
            error!("{}", e);
            ApiError::Internal("Failed to process password".into())
        })?;

    let (id, name) = (req.id.clone(), req.name.clone());
    with_db(&state, move |db| db.create_user(&id, &name, Some(&password_hash)))
        .await
        .map_err(|e| e.context("Failed to create user"))?;

    info!("Registered user {}", req.id);
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            id: req.id,
            name: req.name,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|_| ApiError::invalid_body())?;

    if req.id.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("ID and password required".into()));
    }

    // Unknown user, missing hash and wrong password all look the same to the caller
    let invalid = || ApiError::Unauthorized("Invalid credentials".into());

    let id = req.id.clone();
    let user = with_db(&state, move |db| db.get_user_by_id(&id)).await?;
    let Some(user) = user else {
        warn!("Login for unknown user '{}'", req.id);
        return Err(invalid());
    };
    let Some(hash) = user.password_hash.filter(|h| !h.is_empty()) else {
        warn!("Login for user '{}' without a password", user.id);
        return Err(invalid());
    };

    let password = req.password;
    if !off_runtime(move || verify_password(&hash, &password)).await? {
        warn!("Wrong password for user '{}'", user.id);
        return Err(invalid());
    }

    let token = state.tokens.issue(&user.id).map_err(|e| {
        error!("{}", e);
        ApiError::Internal("Failed to generate token".into())
    })?;

    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse { token }))
}
