use crate::dashboards::AccountsOverview;
use crate::domain::a001_commodity::ui::list::CommoditiesPage;
use crate::layout::DashboardLayout;
use crate::shared::cache::provide_cache;
use crate::shared::theme::ThemeProvider;
use crate::system::auth::context::SessionProvider;
use crate::system::data_source::DataSourceProvider;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--centered">
            <h1>"Page not found"</h1>
            <a href="/dashboard/accounts">"Back to accounts"</a>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Cache first: the theme provider reads it on creation.
    provide_cache();

    view! {
        <ThemeProvider>
            <SessionProvider>
                <DataSourceProvider>
                    <Router>
                        <Routes fallback=|| view! { <NotFound /> }>
                            <Route path=path!("/") view=|| view! { <Redirect path="/dashboard/accounts" /> } />
                            <Route path=path!("/user/login") view=LoginPage />
                            <ParentRoute path=path!("/dashboard") view=DashboardLayout>
                                <Route path=path!("") view=AccountsOverview />
                                <Route path=path!("accounts") view=AccountsOverview />
                                <Route path=path!("commodities") view=CommoditiesPage />
                            </ParentRoute>
                        </Routes>
                    </Router>
                </DataSourceProvider>
            </SessionProvider>
        </ThemeProvider>
    }
}
