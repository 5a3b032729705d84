use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// True until the stored session has been checked with the server.
    pub is_loading: bool,
}

impl AuthState {
    /// Initial state: nothing known yet.
    pub fn restoring() -> Self {
        Self {
            access_token: None,
            user_info: None,
            is_loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            is_loading: false,
            ..Self::restoring()
        }
    }

    pub fn signed_in(access_token: String, user_info: UserInfo) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: Some(user_info),
            is_loading: false,
        }
    }

    pub fn session(&self) -> Session {
        Session {
            is_authenticated: self.access_token.is_some(),
            is_loading: self.is_loading,
        }
    }
}

/// What the readiness gate needs to know about authentication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Check the stored tokens: the access token first, then a refresh.
async fn restore_session() -> AuthState {
    if let Some(access_token) = storage::get_access_token() {
        match api::get_current_user(&access_token).await {
            Ok(user_info) => return AuthState::signed_in(access_token, user_info),
            Err(e) => log::info!("Stored access token rejected: {}", e),
        }
    }

    let Some(refresh_token) = storage::get_refresh_token() else {
        storage::clear_tokens();
        return AuthState::signed_out();
    };

    let refreshed = match api::refresh_token(refresh_token).await {
        Ok(response) => response.access_token,
        Err(e) => {
            log::info!("Session refresh failed: {}", e);
            storage::clear_tokens();
            return AuthState::signed_out();
        }
    };
    storage::save_access_token(&refreshed);

    match api::get_current_user(&refreshed).await {
        Ok(user_info) => AuthState::signed_in(refreshed, user_info),
        Err(e) => {
            log::warn!("Refreshed token rejected: {}", e);
            storage::clear_tokens();
            AuthState::signed_out()
        }
    }
}

/// Session provider: restores the session from localStorage on mount.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::restoring());

    spawn_local(async move {
        let restored = restore_session().await;
        log::debug!("Session restored, authenticated: {}", restored.access_token.is_some());
        set_auth_state.set(restored);
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("SessionProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("SessionProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Reactive `{ is_authenticated, is_loading }`.
pub fn use_session() -> Signal<Session> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(AuthState::session))
}

/// Store tokens of a successful login and publish the session.
pub fn sign_in(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_tokens(&response.access_token, &response.refresh_token);
    set_auth_state.set(AuthState::signed_in(response.access_token, response.user));
}

/// Revoke the refresh token (best effort) and clear the session.
pub async fn sign_out(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("{}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::signed_out());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_flags() {
        assert_eq!(
            AuthState::restoring().session(),
            Session {
                is_authenticated: false,
                is_loading: true
            }
        );
        assert_eq!(
            AuthState::signed_out().session(),
            Session {
                is_authenticated: false,
                is_loading: false
            }
        );

        let user = UserInfo {
            id: "1".into(),
            username: "admin".into(),
            full_name: None,
        };
        assert_eq!(
            AuthState::signed_in("token".into(), user).session(),
            Session {
                is_authenticated: true,
                is_loading: false
            }
        );
    }
}
