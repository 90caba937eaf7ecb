//! Password hashing and token issuance/validation.

use std::time::Duration;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

use starboard_types::api::Claims;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to hash password: {0}")]
    Hash(String),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    BadSignature,

    #[error("token is signed with an unexpected algorithm")]
    UnexpectedAlgorithm,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::InvalidAlgorithm => Self::UnexpectedAlgorithm,
            _ => Self::Malformed(e.to_string()),
        }
    }
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Any failure, including an unparsable stored hash, counts as a mismatch.
pub fn verify_password(hash: &str, plaintext: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Issues and validates HS256 tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Returns the token subject. Any HMAC algorithm is accepted; tokens
    /// are always issued with HS256.
    pub fn validate(&self, raw: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        let data = decode::<Claims>(raw, &self.decoding, &validation)?;
        Ok(data.claims.sub)
    }
}
