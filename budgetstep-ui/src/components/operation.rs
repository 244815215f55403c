//! Operation Form
//!
//! The sign picks the form mode: transfers show a destination account,
//! income and expense show a category. Only the visible field is sent.

use budgetstep::forms::{FormMode, OperationForm};
use budgetstep::model::{Id, OperationKind, Sign};
use budgetstep::render;
use leptos::*;

use super::{options_view, parse_id, BUTTON_CLASS, CARD_CLASS, INPUT_CLASS};
use crate::state::use_ui_state;

#[component]
pub fn OperationPanel() -> impl IntoView {
    let state = use_ui_state();

    let kind = create_rw_signal(OperationKind::Planned);
    let sign = create_rw_signal(Sign::Expense);
    let amount = create_rw_signal(String::new());
    let currency = create_rw_signal("EUR".to_string());
    let account_id = create_rw_signal(None::<Id>);
    let account_id_to = create_rw_signal(None::<Id>);
    let category_id = create_rw_signal(None::<Id>);
    let comment = create_rw_signal(String::new());
    let (app, busy) = (state.app, state.busy);

    // Ids picked under another budget are stale
    let budget_id = create_memo(move |_| app.with(|s| s.current_budget_id));
    create_effect(move |previous: Option<Option<Id>>| {
        let current = budget_id.get();
        if previous.is_some() {
            account_id.set(None);
            account_id_to.set(None);
            category_id.set(None);
        }
        current
    });

    let visibility = create_memo(move |_| FormMode::for_sign(sign.get()).visibility());

    let submit_state = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = OperationForm {
            kind: kind.get_untracked(),
            sign: sign.get_untracked(),
            amount: amount.get_untracked(),
            currency: currency.get_untracked(),
            account_id: account_id.get_untracked(),
            account_id_to: account_id_to.get_untracked(),
            category_id: category_id.get_untracked(),
            comment: comment.get_untracked(),
        };
        amount.set(String::new());
        comment.set(String::new());
        submit_state.dispatch(move |session, snapshot| async move {
            session.add_operation(snapshot, &form).await
        });
    };

    view! {
        <section class=CARD_CLASS>
            <h2 class="text-lg font-semibold">"Add operation"</h2>
            <form class="grid grid-cols-2 gap-2" on:submit=on_submit>
                <select
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse() {
                            kind.set(value);
                        }
                    }
                >
                    <option value="planned" selected=true>"planned"</option>
                    <option value="actual">"actual"</option>
                </select>

                <select
                    class=INPUT_CLASS
                    on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse() {
                            sign.set(value);
                        }
                    }
                >
                    <option value="income">"income"</option>
                    <option value="expense" selected=true>"expense"</option>
                    <option value="transfer">"transfer"</option>
                </select>

                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="Amount"
                    class=INPUT_CLASS
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Currency"
                    class=INPUT_CLASS
                    prop:value=move || currency.get()
                    on:input=move |ev| currency.set(event_target_value(&ev))
                />

                <label class="text-sm text-gray-400">"Account"</label>
                <select
                    class=INPUT_CLASS
                    on:change=move |ev| account_id.set(parse_id(&event_target_value(&ev)))
                >
                    <option value="">"—"</option>
                    {move || {
                        let chosen = account_id.get();
                        app.with(|s| options_view(render::account_options(s, chosen)))
                    }}
                </select>

                <Show when=move || visibility.get().destination_account>
                    <label class="text-sm text-gray-400">"To account"</label>
                    <select
                        class=INPUT_CLASS
                        on:change=move |ev| account_id_to.set(parse_id(&event_target_value(&ev)))
                    >
                        <option value="">"—"</option>
                        {move || {
                            let chosen = account_id_to.get();
                            app.with(|s| options_view(render::account_options(s, chosen)))
                        }}
                    </select>
                </Show>

                <Show when=move || visibility.get().category>
                    <label class="text-sm text-gray-400">"Category"</label>
                    <select
                        class=INPUT_CLASS
                        on:change=move |ev| category_id.set(parse_id(&event_target_value(&ev)))
                    >
                        <option value="">"—"</option>
                        {move || {
                            let chosen = category_id.get();
                            app.with(|s| options_view(render::category_options(s, chosen)))
                        }}
                    </select>
                </Show>

                <input
                    type="text"
                    placeholder="Comment"
                    class=format!("{} col-span-2", INPUT_CLASS)
                    prop:value=move || comment.get()
                    on:input=move |ev| comment.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class=format!("{} col-span-2", BUTTON_CLASS)
                    disabled=move || busy.get()
                >
                    "Add operation"
                </button>
            </form>
        </section>
    }
}
