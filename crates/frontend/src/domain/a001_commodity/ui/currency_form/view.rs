use contracts::domain::a001_commodity::aggregate::Commodity;
use leptos::prelude::*;

use super::fields::{FieldDescriptor, FieldKind, CURRENCY_FIELDS};
use super::view_model::CurrencyFormViewModel;
use crate::shared::cache::use_cache;

/// Currency creation form. `on_save` receives the stored commodity.
#[component]
pub fn CurrencyForm(#[prop(into)] on_save: Callback<Commodity>) -> impl IntoView {
    let vm = CurrencyFormViewModel::new(&CURRENCY_FIELDS);
    let cache = use_cache();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit_command(cache.clone(), on_save);
    };

    view! {
        <form class="currency-form" on:submit=on_submit>
            <fieldset class="form-group">
                {CURRENCY_FIELDS.into_iter().map(|field| render_field(field, vm)).collect_view()}
            </fieldset>

            {move || vm.submit_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    type="submit"
                    disabled=move || !vm.can_submit()
                >
                    {move || if vm.saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </form>
    }
}

fn render_field(field: FieldDescriptor, vm: CurrencyFormViewModel) -> AnyView {
    let key = field.name.key();
    match field.kind {
        FieldKind::Hidden { value } => view! {
            <input type="hidden" name=key value=value />
        }
        .into_any(),
        FieldKind::CreatableSelect { .. } => {
            let input_id = format!("{}-selector", key);
            let list_id = format!("{}-options", key);
            let typed = RwSignal::new(String::new());
            view! {
                <label for=input_id.clone()>{field.label}</label>
                <input
                    id=input_id
                    name=key
                    list=list_id.clone()
                    autocomplete="off"
                    placeholder=field.kind.placeholder()
                    prop:value=move || typed.get()
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        vm.set_field(field, &raw);
                        typed.set(raw);
                    }
                />
                <datalist id=list_id>
                    {move || {
                        field
                            .kind
                            .choices(&typed.get())
                            .into_iter()
                            .map(|choice| view! { <option value=choice.clone()>{choice.clone()}</option> })
                            .collect_view()
                    }}
                </datalist>
                <p class="invalid-feedback">{move || vm.error_of(field.name).unwrap_or_default()}</p>
            }
            .into_any()
        }
    }
}
