use anyhow::Result;
use chrono::Utc;

use super::repository::{self, User};
use crate::system::auth::password;

/// Create a new user, returns its id
pub async fn create(username: &str, plain_password: &str, full_name: Option<String>) -> Result<String> {
    if username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    if repository::get_by_username(username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    password::validate_password_strength(plain_password)?;
    let password_hash = password::hash_password(plain_password)?;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: username.trim().to_string(),
        full_name,
        created_at: Utc::now().to_rfc3339(),
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user.id)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, plain_password: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(plain_password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.username, e);
    }

    Ok(Some(user))
}
