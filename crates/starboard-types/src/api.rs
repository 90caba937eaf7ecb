use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Token claims. Only the subject and the validity window are bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// -- Users --

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserCreatedResponse {
    pub id: String,
    pub name: String,
}

// -- Assets --

#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    #[serde(rename = "type", default)]
    pub asset_type: String,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub data: Option<serde_json::Value>,
}

// -- Favourites --

#[derive(Debug, Deserialize)]
pub struct AddFavouriteRequest {
    #[serde(default)]
    pub asset_id: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFavouriteRequest {
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavouriteResponse {
    pub user_id: String,
    pub asset_id: String,
    pub description: Option<String>,
    pub message: String,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
