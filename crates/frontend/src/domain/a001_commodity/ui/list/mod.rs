use contracts::domain::a001_commodity::aggregate::Commodity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_commodity::api;
use crate::domain::a001_commodity::ui::currency_form::CurrencyForm;
use crate::shared::cache::{use_cache, use_cached, COMMODITIES_KEY};
use crate::shared::icons::icon;

/// `/dashboard/commodities`: commodity list plus the currency form.
#[component]
pub fn CommoditiesPage() -> impl IntoView {
    let commodities = use_cached(COMMODITIES_KEY, api::fetch_commodities);
    let cache = use_cache();
    let (notice, set_notice) = signal::<Option<String>>(None);

    let on_save = Callback::new(move |commodity: Commodity| {
        set_notice.set(Some(format!("{} added", commodity.mnemonic)));
    });

    let rows = move || {
        commodities.data.with(|data| {
            let mut items = data.clone().unwrap_or_default();
            items.sort_by(|a, b| (&a.namespace, &a.mnemonic).cmp(&(&b.namespace, &b.mnemonic)));
            items
        })
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Currencies & commodities"</h1>
                    <Badge>{move || rows().len().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| cache.invalidate(COMMODITIES_KEY)
                        disabled=Signal::derive(move || commodities.loading.get())
                    >
                        {icon("refresh")}
                        {move || if commodities.is_loading() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || commodities.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {move || notice.get().map(|n| view! { <div class="alert alert--success">{n}</div> })}

                <section class="card">
                    <h2>"Add currency"</h2>
                    <CurrencyForm on_save=on_save />
                </section>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Namespace"</TableHeaderCell>
                                <TableHeaderCell>"Mnemonic"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=rows
                                key=|c| c.guid
                                children=move |c: Commodity| {
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{c.namespace.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-weight: 500;">{c.mnemonic.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </div>
    }
}
