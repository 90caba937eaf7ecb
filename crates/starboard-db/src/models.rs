//! Database row types — these map directly to SQLite rows.
//! Distinct from starboard-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub created_at: String,
}

pub struct AssetRow {
    pub id: String,
    pub asset_type: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub data: String,
    pub created_at: String,
}
