use chrono::NaiveDate;
use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityId};
use contracts::domain::a002_price::aggregate::{Price, PriceFilter};
use contracts::domain::a003_account::aggregate::AccountId;
use contracts::domain::a004_transaction::aggregate::{AccountSplit, Transaction};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::table::{build_totals_table, TotalsRow, TotalsTable};
use crate::domain::a001_commodity::api::fetch_commodities;
use crate::queries;
use crate::shared::cache::{use_cached, COMMODITIES_KEY};
use crate::shared::date_utils::{format_amount, format_date, format_month_key};

/// Everything the overview shows, loaded in one go.
#[derive(Debug, Clone, Default)]
struct Overview {
    main_currency: Option<Commodity>,
    earliest: Option<NaiveDate>,
    latest: Vec<Transaction>,
    table: TotalsTable,
    prices: Vec<Price>,
}

async fn load_overview() -> Result<Overview, String> {
    let main_currency = queries::get_main_currency().await?;
    let earliest = queries::get_earliest_date().await?;
    let latest = queries::get_latest_txs().await?;
    let totals = queries::get_monthly_totals().await?;
    let accounts = queries::get_accounts().await?;
    let prices = queries::get_prices(&PriceFilter::default()).await?;

    Ok(Overview {
        main_currency,
        earliest: Some(earliest),
        latest,
        table: build_totals_table(&totals, &accounts),
        prices,
    })
}

/// Amount moved by a transaction: the sum of its debit side.
fn transaction_amount(tx: &Transaction) -> f64 {
    tx.splits.iter().map(|s| s.value).filter(|v| *v > 0.0).sum()
}

fn still_selected(selected: Option<&(AccountId, String)>, requested: AccountId) -> bool {
    selected.is_some_and(|(account, _)| *account == requested)
}

/// `/dashboard/accounts`: main currency, monthly income/expense totals,
/// latest transactions and exchange rates.
#[component]
pub fn AccountsOverview() -> impl IntoView {
    let (overview, set_overview) = signal(None::<Overview>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let selected: RwSignal<Option<(AccountId, String)>> = RwSignal::new(None);
    let (splits, set_splits) = signal(Vec::<AccountSplit>::new());

    let commodities = use_cached(COMMODITIES_KEY, fetch_commodities);
    let mnemonic_of = move |guid: CommodityId| {
        commodities.data.with(|list| {
            list.as_ref()
                .and_then(|l| l.iter().find(|c| c.guid == guid))
                .map(|c| c.mnemonic.clone())
                .unwrap_or_else(|| "?".to_string())
        })
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match load_overview().await {
                Ok(data) => set_overview.set(Some(data)),
                Err(e) => {
                    log::error!("Failed to load accounts overview: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };
    load_data();

    // Splits of the account picked in the totals table
    Effect::new(move |_| {
        let Some((account, _)) = selected.get() else {
            set_splits.set(Vec::new());
            return;
        };
        spawn_local(async move {
            let result = queries::get_splits(account).await;
            // A later click may have picked another account meanwhile
            if !still_selected(selected.get_untracked().as_ref(), account) {
                return;
            }
            match result {
                Ok(list) => set_splits.set(list),
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let currency_label = move || {
        overview.with(|o| {
            o.as_ref()
                .and_then(|o| o.main_currency.as_ref())
                .map(|c| c.mnemonic.clone())
                .unwrap_or_else(|| "-".to_string())
        })
    };
    let since_label = move || {
        overview.with(|o| {
            o.as_ref()
                .and_then(|o| o.earliest)
                .map(format_date)
                .unwrap_or_default()
        })
    };
    let table = move || overview.with(|o| o.as_ref().map(|o| o.table.clone()).unwrap_or_default());

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Accounts"</h1>
                    <Badge>{currency_label}</Badge>
                    <span class="page__subtitle">{move || format!("since {}", since_label())}</span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <section class="card">
                    <h2>"Monthly totals"</h2>
                    {move || {
                        let TotalsTable { months, rows } = table();
                        if rows.is_empty() {
                            return view! { <p class="muted">"No income or expenses yet."</p> }.into_any();
                        }
                        view! {
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Account"</TableHeaderCell>
                                        {months
                                            .iter()
                                            .map(|m| {
                                                let label = format_month_key(m);
                                                view! { <TableHeaderCell>{label}</TableHeaderCell> }
                                            })
                                            .collect_view()}
                                        <TableHeaderCell>"Total"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows
                                        .into_iter()
                                        .map(|row| totals_row(row, selected))
                                        .collect_view()}
                                </TableBody>
                            </Table>
                        }
                        .into_any()
                    }}
                </section>

                <Show when=move || selected.with(Option::is_some)>
                    <section class="card">
                        <h2>{move || selected.get().map(|(_, name)| name).unwrap_or_default()}</h2>
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Date"</TableHeaderCell>
                                    <TableHeaderCell>"Description"</TableHeaderCell>
                                    <TableHeaderCell>"Amount"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || splits.get()
                                    key=|s| s.split.guid
                                    children=move |s: AccountSplit| {
                                        view! {
                                            <TableRow>
                                                <TableCell>{format_date(s.transaction.date)}</TableCell>
                                                <TableCell>{s.transaction.description.clone()}</TableCell>
                                                <TableCell class="amount">{format_amount(s.split.quantity)}</TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </section>
                </Show>

                <section class="card">
                    <h2>"Latest transactions"</h2>
                    <ul class="tx-list">
                        <For
                            each=move || overview.with(|o| o.as_ref().map(|o| o.latest.clone()).unwrap_or_default())
                            key=|tx| tx.guid
                            children=move |tx: Transaction| {
                                let amount = format!("{} {}", format_amount(transaction_amount(&tx)), mnemonic_of(tx.currency));
                                view! {
                                    <li class="tx-list__item">
                                        <span class="tx-list__date">{format_date(tx.date)}</span>
                                        <span class="tx-list__description">{tx.description.clone()}</span>
                                        <span class="tx-list__amount">{amount}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </section>

                <section class="card">
                    <h2>"Exchange rates"</h2>
                    <ul class="price-list">
                        <For
                            each=move || overview.with(|o| o.as_ref().map(|o| o.prices.clone()).unwrap_or_default())
                            key=|p| p.guid
                            children=move |p: Price| {
                                view! {
                                    <li>
                                        {format!(
                                            "{}  1 {} = {:.4} {}",
                                            format_date(p.date),
                                            mnemonic_of(p.from),
                                            p.value,
                                            mnemonic_of(p.to),
                                        )}
                                    </li>
                                }
                            }
                        />
                    </ul>
                </section>
            </div>
        </div>
    }
}

fn totals_row(row: TotalsRow, selected: RwSignal<Option<(AccountId, String)>>) -> impl IntoView {
    let TotalsRow {
        account,
        name,
        cells,
        total,
        ..
    } = row;
    let label = name.clone();
    let on_click = move |_| {
        if let Some(account) = account {
            selected.set(Some((account, label.clone())));
        }
    };

    view! {
        <TableRow class="totals-row" on:click=on_click>
            <TableCell>{name}</TableCell>
            {cells
                .into_iter()
                .map(|v| view! { <TableCell class="amount">{format_amount(v)}</TableCell> })
                .collect_view()}
            <TableCell class="amount total">{format_amount(total)}</TableCell>
        </TableRow>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_splits_of_previous_account_are_dropped() {
        let a = AccountId::new_v4();
        let b = AccountId::new_v4();
        let now_showing = (b, "Groceries".to_string());

        assert!(still_selected(Some(&now_showing), b));
        assert!(!still_selected(Some(&now_showing), a));
        assert!(!still_selected(None, a));
    }
}
