use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::system::auth::api;
use crate::system::auth::context::{sign_in, use_auth};

/// Where a successful login lands.
pub const AFTER_LOGIN_PATH: &str = "/dashboard";

/// Navigate once, when the session goes from absent (or unknown) to present.
fn entered_session(was_signed_in: Option<bool>, signed_in: bool) -> bool {
    signed_in && was_signed_in != Some(true)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (auth_state, set_auth_state) = use_auth();
    let navigate = use_navigate();

    // Single exit from the page: restored session or a successful submit
    Effect::new(move |was_signed_in: Option<bool>| {
        let signed_in = auth_state.with(|s| s.access_token.is_some());
        if entered_session(was_signed_in, signed_in) {
            navigate(AFTER_LOGIN_PATH, Default::default());
        }
        signed_in
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(response) => {
                    set_is_loading.set(false);
                    sign_in(set_auth_state, response);
                }
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Ledger"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_navigates_once() {
        // Mount signed out, then the submit signs in
        assert!(!entered_session(None, false));
        assert!(entered_session(Some(false), true));
        // Later updates of the same session do not navigate again
        assert!(!entered_session(Some(true), true));
    }

    #[test]
    fn test_restored_session_skips_form() {
        assert!(entered_session(None, true));
    }
}
