pub mod assets;
pub mod auth;
pub mod config;
pub mod convert;
pub mod credentials;
pub mod error;
pub mod favourites;
pub mod middleware;
pub mod router;
pub mod users;

pub use auth::{AppState, AppStateInner};
pub use config::AuthConfig;
pub use error::ApiError;
pub use router::app;
