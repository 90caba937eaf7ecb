use rusqlite::ffi;
use thiserror::Error;

use starboard_types::CodecError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("DB lock poisoned: {0}")]
    Lock(String),
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::Conflict(msg.clone().unwrap_or_else(|| err.to_string()))
            }
            _ => Self::Sqlite(e),
        }
    }
}

impl DbError {
    pub(crate) fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        )
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
