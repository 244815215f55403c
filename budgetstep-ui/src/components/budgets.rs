//! Budget selector and creation form.

use budgetstep::forms::BudgetForm;
use budgetstep::render;
use leptos::*;

use super::{options_view, parse_id, BUTTON_CLASS, CARD_CLASS, INPUT_CLASS};
use crate::state::use_ui_state;

#[component]
pub fn BudgetPanel() -> impl IntoView {
    let state = use_ui_state();

    let name = create_rw_signal(String::new());
    let currency = create_rw_signal("EUR".to_string());
    let owner = create_rw_signal("1".to_string());

    let change_state = state.clone();
    let on_change = move |ev: web_sys::Event| {
        if let Some(budget_id) = parse_id(&event_target_value(&ev)) {
            change_state.dispatch(move |session, snapshot| async move {
                session.change_budget(snapshot, budget_id).await
            });
        }
    };

    let create_state = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = BudgetForm {
            name: name.get_untracked(),
            currency: currency.get_untracked(),
            owner_user_id: owner.get_untracked(),
        };
        name.set(String::new());
        create_state.dispatch(move |session, snapshot| async move {
            session.create_budget(snapshot, &form).await
        });
    };

    let app = state.app;
    view! {
        <section class=CARD_CLASS>
            <h2 class="text-lg font-semibold">"Budget"</h2>
            <select class=INPUT_CLASS on:change=on_change>
                {move || app.with(|s| options_view(render::budget_options(s)))}
            </select>

            <form class="flex flex-wrap gap-2" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Name"
                    class=INPUT_CLASS
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Currency"
                    class=INPUT_CLASS
                    prop:value=move || currency.get()
                    on:input=move |ev| currency.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Owner id"
                    class=INPUT_CLASS
                    prop:value=move || owner.get()
                    on:input=move |ev| owner.set(event_target_value(&ev))
                />
                <button type="submit" class=BUTTON_CLASS disabled=move || state.busy.get()>
                    "Create budget"
                </button>
            </form>
        </section>
    }
}
