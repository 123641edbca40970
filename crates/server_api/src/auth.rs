use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use shared::domain::Role;
use storage::StoredUser;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub fn mint_token(
    cfg: &AuthConfig,
    user: &StoredUser,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::seconds(cfg.token_ttl_seconds);
    let claims = Claims {
        sub: user.user_id.0,
        username: user.username.clone(),
        role: user.role,
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
}

pub fn verify_token(cfg: &AuthConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Salted SHA-256 digest, stored as `salt$hash` with both halves base64.
pub fn password_digest(password: &str) -> String {
    let salt = uuid::Uuid::new_v4();
    digest_with_salt(salt.as_bytes(), password)
}

pub fn verify_password(digest: &str, password: &str) -> bool {
    let Some((salt_b64, _)) = digest.split_once('$') else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(salt_b64) else {
        return false;
    };
    digest_with_salt(&salt, password) == digest
}

fn digest_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(b":");
    hasher.update(password.as_bytes());
    let hash = hasher.finalize();
    format!("{}${}", STANDARD.encode(salt), STANDARD.encode(hash))
}
