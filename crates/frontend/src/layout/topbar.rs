//! Topbar - application top navigation bar.
//!
//! Brand, signed-in user, theme toggle and logout.

use crate::shared::icons::icon;
use crate::shared::theme::ThemeToggle;
use crate::system::auth::context::{sign_out, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn Topbar() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    // Signing out flips the session, the readiness gate then redirects to login
    let logout = move |_| {
        spawn_local(sign_out(set_auth_state));
    };

    let user_name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
                .unwrap_or_default()
        })
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Ledger"</span>
            </div>

            <div class="top-header__actions">
                <span class="top-header__user">{user_name}</span>
                <ThemeToggle />
                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </header>
    }
}
