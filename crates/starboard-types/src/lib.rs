pub mod api;
pub mod assets;
pub mod models;

pub use assets::{AssetData, AssetType, CodecError, decode_asset_data};
