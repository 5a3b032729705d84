use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo};
use gloo_net::http::{Request, Response};
use serde::Serialize;

use crate::shared::api_utils::api_url;

/// POST to a public auth endpoint; `action` names the call in error messages.
async fn post_public<B: Serialize>(path: &str, body: &B, action: &str) -> Result<Response, String> {
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(match response.status() {
            401 => format!("{}: invalid credentials", action),
            status => format!("{} failed: {}", action, status),
        });
    }
    Ok(response)
}

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    post_public(
        "/api/system/auth/login",
        &LoginRequest { username, password },
        "Login",
    )
    .await?
    .json::<LoginResponse>()
    .await
    .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    post_public(
        "/api/system/auth/refresh",
        &RefreshRequest { refresh_token },
        "Refresh",
    )
    .await?
    .json::<RefreshResponse>()
    .await
    .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Revoke the refresh token on the server
pub async fn logout(refresh_token: String) -> Result<(), String> {
    post_public(
        "/api/system/auth/logout",
        &RefreshRequest { refresh_token },
        "Logout",
    )
    .await
    .map(|_| ())
}

/// Validate an access token by asking who it belongs to
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/api/system/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Token rejected: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
