use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::footer::Footer;
use super::left_sidebar::LeftSidebar;
use super::readiness::{GateEffect, GateInputs, GateState, ReadinessGate};
use super::topbar::Topbar;
use crate::shared::theme::{apply_theme, use_theme};
use crate::system::auth::context::use_session;
use crate::system::data_source::use_data_source;

/// Layout of every `/dashboard/*` page, guarded by the readiness gate.
///
/// ```text
/// +------------------------------------------+
/// |                 Topbar                   |
/// +------------------------------------------+
/// |  LeftSidebar  |   page (Outlet)          |
/// +------------------------------------------+
/// |                 Footer                   |
/// +------------------------------------------+
/// ```
#[component]
pub fn DashboardLayout() -> impl IntoView {
    let data_source = use_data_source();
    let session = use_session();
    let theme = use_theme().theme;
    let navigate = use_navigate();

    // Theme does not wait for the gate
    Effect::new(move |_| apply_theme(theme.get()));

    let inputs = Memo::new(move |_| {
        let session = session.get();
        GateInputs {
            is_loaded: data_source.get().is_loaded,
            session_loading: session.is_loading,
            is_authenticated: session.is_authenticated,
        }
    });
    let state = Memo::new(move |_| GateState::from_inputs(inputs.get()));

    Effect::new(move |prev: Option<ReadinessGate>| {
        let mut gate = prev.unwrap_or_default();
        if let Some(GateEffect::Navigate(path)) = gate.transition(inputs.get()) {
            log::info!("Not signed in, redirecting to {}", path);
            navigate(
                path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
        gate
    });

    move || {
        if state.get().renders_shell() {
            view! {
                <div class="app-layout">
                    <Topbar />
                    <div class="app-body">
                        <LeftSidebar />
                        <main class="app-main">
                            <Outlet />
                        </main>
                    </div>
                    <Footer />
                </div>
            }
            .into_any()
        } else {
            view! { <LoadingPlaceholder /> }.into_any()
        }
    }
}

#[component]
fn LoadingPlaceholder() -> impl IntoView {
    view! {
        <div class="app-loading" role="status" aria-live="polite">
            <div class="app-loading__spinner"></div>
            <span>"Loading..."</span>
        </div>
    }
}
