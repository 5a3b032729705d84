use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

const NAV_ITEMS: [(&str, &str, &str); 2] = [
    ("/dashboard/accounts", "accounts", "Accounts"),
    ("/dashboard/commodities", "commodities", "Currencies"),
];

#[component]
pub fn LeftSidebar() -> impl IntoView {
    view! {
        <nav class="main-nav-bar">
            <ul>
                {NAV_ITEMS
                    .into_iter()
                    .map(|(href, icon_name, title)| {
                        view! {
                            <li>
                                <A href=href>
                                    {icon(icon_name)}
                                    <span>{title}</span>
                                </A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
