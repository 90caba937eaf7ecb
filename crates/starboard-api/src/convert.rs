use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use starboard_db::models::{AssetRow, UserRow};
use starboard_types::AssetType;
use starboard_types::models::{Asset, User};

use crate::error::ApiError;

pub fn user_from_row(row: UserRow) -> User {
    User {
        created_at: parse_timestamp(&row.created_at, &row.id),
        id: row.id,
        name: row.name,
    }
}

pub fn asset_from_row(row: AssetRow) -> Result<Asset, ApiError> {
    let asset_type: AssetType = row
        .asset_type
        .parse()
        .map_err(|e: starboard_types::CodecError| ApiError::Store(e.to_string()))?;
    let data = serde_json::from_str(&row.data).map_err(|e| {
        ApiError::Store(format!("Corrupt data on asset '{}': {}", row.id, e))
    })?;

    Ok(Asset {
        created_at: parse_timestamp(&row.created_at, &row.id),
        id: row.id,
        asset_type,
        title: row.title,
        description: row.description,
        data,
    })
}

fn parse_timestamp(raw: &str, owner: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by hand may use SQLite's "YYYY-MM-DD HH:MM:SS" without timezone.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on '{}': {}", raw, owner, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_timestamp_layouts() {
        let a = parse_timestamp("2026-03-01T10:20:30.123Z", "x");
        let b = parse_timestamp("2026-03-01 10:20:30", "x");
        assert_eq!(a.timestamp(), b.timestamp());
        assert_eq!(parse_timestamp("garbage", "x"), DateTime::<Utc>::default());
    }
}
