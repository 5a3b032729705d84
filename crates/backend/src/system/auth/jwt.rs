use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::data::db::get_connection;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;
const JWT_SECRET_KEY: &str = "jwt_secret";

/// Claims for a fresh access token
pub fn new_claims(user_id: &str, username: &str) -> TokenClaims {
    let now = Utc::now();
    TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

pub fn encode_token(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_token(token: &str, secret: &str) -> Result<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(data.claims)
}

/// Generate JWT access token with 24 hours lifetime
pub fn generate_access_token(user_id: &str, username: &str) -> Result<String> {
    encode_token(&new_claims(user_id, username), jwt_secret()?)
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    decode_token(token, jwt_secret()?)
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Load the signing secret into memory, creating it on first start.
pub async fn load_jwt_secret() -> Result<()> {
    let secret = load_or_create_secret(get_connection()).await?;
    JWT_SECRET
        .set(secret)
        .map_err(|_| anyhow!("JWT secret already loaded"))
}

fn jwt_secret() -> Result<&'static str> {
    JWT_SECRET
        .get()
        .map(String::as_str)
        .context("JWT secret not loaded")
}

/// Stored secret, or a new one when none is stored. A failed read is an error,
/// never a reason to write a new secret.
async fn load_or_create_secret(conn: &DatabaseConnection) -> Result<String> {
    if let Some(secret) = read_secret(conn).await? {
        return Ok(secret);
    }

    insert_secret_if_absent(conn, &generate_jwt_secret()).await?;
    // Another writer may have inserted first; its secret is the one that counts
    read_secret(conn)
        .await?
        .context("JWT secret missing after insert")
}

/// Generate a random JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn read_secret(conn: &DatabaseConnection) -> Result<Option<String>> {
    let row = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await
        .context("Failed to read JWT secret")?;

    match row {
        Some(row) => Ok(Some(
            row.try_get("", "value")
                .context("Stored JWT secret is unreadable")?,
        )),
        None => Ok(None),
    }
}

async fn insert_secret_if_absent(conn: &DatabaseConnection, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await
    .context("Failed to store JWT secret")?;

    Ok(())
}

/// Calculate refresh token expiration timestamp
pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let secret = generate_jwt_secret();
        let claims = new_claims("user-1", "admin");
        let token = encode_token(&claims, &secret).unwrap();

        let decoded = decode_token(&token, &secret).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_token(&new_claims("user-1", "admin"), "one").unwrap();
        assert!(decode_token(&token, "two").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "secret";
        let mut claims = new_claims("user-1", "admin");
        claims.iat -= 3 * 24 * 3600;
        claims.exp = claims.iat + 60;
        let token = encode_token(&claims, secret).unwrap();
        assert!(decode_token(&token, secret).is_err());
    }

    #[test]
    fn test_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let decoded = general_purpose::STANDARD
            .decode(generate_jwt_secret())
            .unwrap();
        assert_eq!(decoded.len(), 32);
    }

    async fn stored_value(conn: &DatabaseConnection) -> Option<String> {
        conn.query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT CAST(value AS TEXT) AS value FROM sys_settings WHERE key = 'jwt_secret'"
                .to_string(),
        ))
        .await
        .unwrap()
        .map(|row| row.try_get::<String>("", "value").unwrap())
    }

    #[tokio::test]
    async fn test_secret_is_created_once() {
        let conn = crate::shared::data::db::open_scratch().await;
        let first = load_or_create_secret(&conn).await.unwrap();
        let again = load_or_create_secret(&conn).await.unwrap();
        assert_eq!(first, again);

        let token = encode_token(&new_claims("user-1", "admin"), &first).unwrap();
        assert!(decode_token(&token, &again).is_ok());
    }

    #[tokio::test]
    async fn test_unreadable_secret_is_not_replaced() {
        let conn = crate::shared::data::db::open_scratch().await;
        load_or_create_secret(&conn).await.unwrap();
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "UPDATE sys_settings SET value = 42 WHERE key = 'jwt_secret'".to_string(),
        ))
        .await
        .unwrap();

        assert!(load_or_create_secret(&conn).await.is_err());
        assert_eq!(stored_value(&conn).await.as_deref(), Some("42"));
    }
}
