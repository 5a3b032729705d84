use anyhow::Result;

use crate::shared::config::AuthConfig;

/// Ensure a login exists: create the configured admin when the users table is empty
pub async fn ensure_admin_user_exists(auth: &AuthConfig) -> Result<()> {
    use crate::system::users::{repository, service};

    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default user '{}'...", auth.admin_username);
    service::create(
        &auth.admin_username,
        &auth.admin_password,
        Some("Administrator".to_string()),
    )
    .await?;
    tracing::warn!("Default user created; change its password in config.toml for production");

    Ok(())
}

/// Load the token signing secret; the first start creates and stores it.
pub async fn ensure_jwt_secret() -> Result<()> {
    crate::system::auth::jwt::load_jwt_secret().await?;
    tracing::info!("JWT secret loaded");
    Ok(())
}
