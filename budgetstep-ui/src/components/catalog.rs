//! Accounts and categories of the current budget.

use budgetstep::forms::{AccountForm, CategoryForm};
use budgetstep::render;
use leptos::*;

use super::{lines_view, BUTTON_CLASS, CARD_CLASS, INPUT_CLASS};
use crate::state::use_ui_state;

#[component]
pub fn CatalogPanel() -> impl IntoView {
    let state = use_ui_state();

    let account_name = create_rw_signal(String::new());
    let account_currency = create_rw_signal("EUR".to_string());
    let category_name = create_rw_signal(String::new());

    let account_state = state.clone();
    let add_account = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = AccountForm {
            name: account_name.get_untracked(),
            currency: account_currency.get_untracked(),
        };
        account_name.set(String::new());
        account_state.dispatch(move |session, snapshot| async move {
            session.add_account(snapshot, &form).await
        });
    };

    let category_state = state.clone();
    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = CategoryForm {
            name: category_name.get_untracked(),
        };
        category_name.set(String::new());
        category_state.dispatch(move |session, snapshot| async move {
            session.add_category(snapshot, &form).await
        });
    };

    let app = state.app;
    let busy = state.busy;
    view! {
        <section class=CARD_CLASS>
            <h2 class="text-lg font-semibold">"Accounts"</h2>
            <ul class="text-sm space-y-1">
                {move || app.with(|s| lines_view(render::account_lines(s), "No accounts"))}
            </ul>
            <form class="flex flex-wrap gap-2" on:submit=add_account>
                <input
                    type="text"
                    placeholder="Account name"
                    class=INPUT_CLASS
                    prop:value=move || account_name.get()
                    on:input=move |ev| account_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Currency"
                    class=INPUT_CLASS
                    prop:value=move || account_currency.get()
                    on:input=move |ev| account_currency.set(event_target_value(&ev))
                />
                <button type="submit" class=BUTTON_CLASS disabled=move || busy.get()>
                    "Add account"
                </button>
            </form>

            <h2 class="text-lg font-semibold">"Categories"</h2>
            <ul class="text-sm space-y-1">
                {move || app.with(|s| lines_view(render::category_lines(s), "No categories"))}
            </ul>
            <form class="flex flex-wrap gap-2" on:submit=add_category>
                <input
                    type="text"
                    placeholder="Category name"
                    class=INPUT_CLASS
                    prop:value=move || category_name.get()
                    on:input=move |ev| category_name.set(event_target_value(&ev))
                />
                <button type="submit" class=BUTTON_CLASS disabled=move || busy.get()>
                    "Add category"
                </button>
            </form>
        </section>
    }
}
