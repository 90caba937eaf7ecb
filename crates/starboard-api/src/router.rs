use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    middleware,
    response::Response,
    routing::{any, get, post},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::auth::{self, AppState};
use crate::error::{ApiError, Result};
use crate::middleware::require_auth;
use crate::{assets, favourites, users};

/// Build the full application router.
///
/// `/register`, `/login` and `/health` are public. Everything under `/users`
/// and `/assets` sits behind the auth gate and is routed by [`Endpoint::resolve`].
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/users", any(dispatch))
        .route("/users/{*rest}", any(dispatch))
        .route("/assets", any(dispatch))
        .route("/assets/{*rest}", any(dispatch))
        .route_layer(middleware::from_fn_with_state(state.gate.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A resolved resource operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    CreateUser,
    ListUsers,
    GetUser(String),
    ListFavourites(String),
    AddFavourite(String),
    UpdateFavourite { user_id: String, asset_id: String },
    RemoveFavourite { user_id: String, asset_id: String },
    CreateAsset,
    ListAssets,
    GetAsset(String),
}

impl Endpoint {
    /// Resolve by segment count and method. A known path shape with the wrong
    /// method is a 405, an unknown shape a 404, an empty id segment a 400.
    pub fn resolve(method: &Method, path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let method = method.as_str();

        match segments.as_slice() {
            ["users"] => match method {
                "POST" => Ok(Self::CreateUser),
                "GET" => Ok(Self::ListUsers),
                _ => Err(ApiError::MethodNotAllowed),
            },
            ["users", user_id] => match method {
                "GET" => Ok(Self::GetUser(id_segment(user_id)?)),
                _ => Err(ApiError::MethodNotAllowed),
            },
            ["users", user_id, "favourites"] => match method {
                "GET" => Ok(Self::ListFavourites(id_segment(user_id)?)),
                "POST" => Ok(Self::AddFavourite(id_segment(user_id)?)),
                _ => Err(ApiError::MethodNotAllowed),
            },
            ["users", user_id, "favourites", asset_id] => {
                let user_id = id_segment(user_id)?;
                let asset_id = id_segment(asset_id)?;
                match method {
                    "PATCH" => Ok(Self::UpdateFavourite { user_id, asset_id }),
                    "DELETE" => Ok(Self::RemoveFavourite { user_id, asset_id }),
                    _ => Err(ApiError::MethodNotAllowed),
                }
            }
            ["assets"] => match method {
                "POST" => Ok(Self::CreateAsset),
                "GET" => Ok(Self::ListAssets),
                _ => Err(ApiError::MethodNotAllowed),
            },
            ["assets", asset_id] => match method {
                "GET" => Ok(Self::GetAsset(id_segment(asset_id)?)),
                _ => Err(ApiError::MethodNotAllowed),
            },
            _ => Err(ApiError::NotFound("not found".into())),
        }
    }
}

fn id_segment(segment: &str) -> Result<String> {
    if segment.is_empty() {
        return Err(ApiError::Validation("invalid path".into()));
    }
    Ok(segment.to_string())
}

/// Decode a JSON request body; any failure is a 400.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::invalid_body()
    })
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response> {
    let endpoint = Endpoint::resolve(&method, uri.path())?;
    debug!(?endpoint, "dispatching {} {}", method, uri.path());

    match endpoint {
        Endpoint::CreateUser => users::create_user(&state, &body).await,
        Endpoint::ListUsers => users::list_users(&state).await,
        Endpoint::GetUser(user_id) => users::get_user(&state, user_id).await,
        Endpoint::ListFavourites(user_id) => favourites::list_favourites(&state, user_id).await,
        Endpoint::AddFavourite(user_id) => favourites::add_favourite(&state, user_id, &body).await,
        Endpoint::UpdateFavourite { user_id, asset_id } => {
            favourites::update_favourite(&state, user_id, asset_id, &body).await
        }
        Endpoint::RemoveFavourite { user_id, asset_id } => {
            favourites::remove_favourite(&state, user_id, asset_id).await
        }
        Endpoint::CreateAsset => assets::create_asset(&state, &body).await,
        Endpoint::ListAssets => assets::list_assets(&state).await,
        Endpoint::GetAsset(asset_id) => assets::get_asset(&state, asset_id).await,
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
