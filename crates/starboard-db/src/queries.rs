use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{info, warn};
use uuid::Uuid;

use starboard_types::models::FavouriteAsset;

use crate::models::{AssetRow, UserRow};
use crate::{Database, DbError, Result};

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, name: &str, password_hash: Option<&str>) -> Result<String> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, password_hash) VALUES (?1, ?2, ?3)",
                (id, name, password_hash),
            )?;
            info!("Created user {}", id);
            Ok(id.to_string())
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, name, password_hash, created_at FROM users ORDER BY id ASC")?;
            let rows = stmt
                .query_map([], user_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Assets --

    /// Insert an asset and return its generated id. `data` must already be JSON text.
    pub fn create_asset(
        &self,
        asset_type: &str,
        title: Option<&str>,
        description: Option<&str>,
        data: &str,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO assets (id, type, title, description, data) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![&id, asset_type, title, description, data],
            )?;
            Ok(())
        })?;
        info!("Created {} asset {}", asset_type, id);
        Ok(id)
    }

    pub fn get_asset_by_id(&self, id: &str) -> Result<Option<AssetRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, type, title, description, data, created_at FROM assets WHERE id = ?1",
                    [id],
                    asset_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_assets(&self) -> Result<Vec<AssetRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, type, title, description, data, created_at
                 FROM assets
                 ORDER BY created_at ASC, rowid ASC",
            )?;
            let rows = stmt
                .query_map([], asset_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Favourites --

    /// Favourite assets of a user, newest favourite first. Every payload is
    /// decoded by its asset type; one bad payload fails the whole listing.
    pub fn get_user_favourites(&self, user_id: &str) -> Result<Vec<FavouriteAsset>> {
        let rows = self.with_conn(|conn| query_favourites(conn, user_id))?;

        rows.into_iter()
            .map(|row| -> Result<FavouriteAsset> {
                let data = starboard_types::decode_asset_data(&row.asset_type, row.data.as_bytes())
                    .map_err(|e| {
                        warn!("Undecodable payload on asset '{}': {}", row.id, e);
                        DbError::from(e)
                    })?;
                Ok(FavouriteAsset {
                    id: row.id,
                    asset_type: data.asset_type(),
                    title: row.title,
                    data,
                    description: row.description,
                })
            })
            .collect()
    }

    /// Insert a favourite, or overwrite its description if the pair already exists.
    pub fn add_favourite(&self, user_id: &str, asset_id: &str, description: Option<&str>) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO favourites (user_id, asset_id, description) VALUES (?1, ?2, ?3)
                 ON CONFLICT (user_id, asset_id) DO UPDATE SET description = excluded.description",
                (user_id, asset_id, description),
            )?;
            Ok(())
        })
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                DbError::MissingReference("asset")
            } else {
                e
            }
        })
    }

    pub fn remove_favourite(&self, user_id: &str, asset_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM favourites WHERE user_id = ?1 AND asset_id = ?2",
                (user_id, asset_id),
            )?;
            if affected == 0 {
                return Err(DbError::NotFound("favourite"));
            }
            Ok(())
        })
    }

    pub fn update_favourite_description(
        &self,
        user_id: &str,
        asset_id: &str,
        description: Option<&str>,
    ) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE favourites SET description = ?3 WHERE user_id = ?1 AND asset_id = ?2",
                (user_id, asset_id, description),
            )?;
            if affected == 0 {
                return Err(DbError::NotFound("favourite"));
            }
            Ok(())
        })
    }
}

struct FavouriteRow {
    id: String,
    asset_type: String,
    title: Option<String>,
    data: String,
    description: Option<String>,
}

fn query_user_by_id(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, password_hash, created_at FROM users WHERE id = ?1")?;

    let row = stmt.query_row([id], user_from_row).optional()?;

    Ok(row)
}

fn query_favourites(conn: &Connection, user_id: &str) -> Result<Vec<FavouriteRow>> {
    // Inner join: favourites whose asset is gone drop out of the listing
    let mut stmt = conn.prepare(
        "SELECT a.id, a.type, a.title, a.data, f.description
         FROM favourites f
         JOIN assets a ON a.id = f.asset_id
         WHERE f.user_id = ?1
         ORDER BY f.created_at DESC, f.rowid DESC",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(FavouriteRow {
                id: row.get(0)?,
                asset_type: row.get(1)?,
                title: row.get(2)?,
                data: row.get(3)?,
                description: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn asset_from_row(row: &Row<'_>) -> rusqlite::Result<AssetRow> {
    Ok(AssetRow {
        id: row.get(0)?,
        asset_type: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        data: row.get(4)?,
        created_at: row.get(5)?,
    })
}
