//! Step selector, step creation and copying planned operations.

use budgetstep::forms::StepForm;
use budgetstep::model::Id;
use budgetstep::render;
use leptos::*;

use super::{options_view, parse_id, BUTTON_CLASS, CARD_CLASS, INPUT_CLASS};
use crate::state::use_ui_state;

#[component]
pub fn StepPanel() -> impl IntoView {
    let state = use_ui_state();

    let name = create_rw_signal(String::new());
    let date_start = create_rw_signal(String::new());
    let date_end = create_rw_signal(String::new());
    let copy_target = create_rw_signal(None::<Id>);
    let (app, busy) = (state.app, state.busy);

    // Ids picked under another budget are stale
    let budget_id = create_memo(move |_| app.with(|s| s.current_budget_id));
    create_effect(move |previous: Option<Option<Id>>| {
        let current = budget_id.get();
        if previous.is_some() {
            copy_target.set(None);
        }
        current
    });

    let change_state = state.clone();
    let on_change = move |ev: web_sys::Event| {
        if let Some(step_id) = parse_id(&event_target_value(&ev)) {
            change_state.dispatch(move |session, snapshot| async move {
                session.change_step(snapshot, step_id).await
            });
        }
    };

    let refresh_state = state.clone();
    let on_refresh = move |_: web_sys::MouseEvent| {
        refresh_state.dispatch(|session, snapshot| async move { session.refresh_step(snapshot).await });
    };

    let create_state = state.clone();
    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = StepForm {
            name: name.get_untracked(),
            date_start: date_start.get_untracked(),
            date_end: date_end.get_untracked(),
        };
        let today = chrono::Local::now().date_naive();
        name.set(String::new());
        create_state.dispatch(move |session, snapshot| async move {
            session.create_step(snapshot, &form, today).await
        });
    };

    let copy_state = state.clone();
    let on_copy = move |_: web_sys::MouseEvent| {
        let target = copy_target.get_untracked();
        copy_state.dispatch(move |session, snapshot| async move {
            session.copy_planned(snapshot, target).await
        });
    };

    view! {
        <section class=CARD_CLASS>
            <h2 class="text-lg font-semibold">"Step"</h2>
            <div class="flex gap-2">
                <select class=INPUT_CLASS on:change=on_change>
                    {move || app.with(|s| options_view(render::step_options(s)))}
                </select>
                <button
                    type="button"
                    class=BUTTON_CLASS
                    disabled=move || busy.get()
                    on:click=on_refresh
                >
                    "Refresh"
                </button>
            </div>

            <form class="flex flex-wrap gap-2" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Name (default: Step <today>)"
                    class=INPUT_CLASS
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    type="date"
                    class=INPUT_CLASS
                    prop:value=move || date_start.get()
                    on:input=move |ev| date_start.set(event_target_value(&ev))
                />
                <input
                    type="date"
                    class=INPUT_CLASS
                    prop:value=move || date_end.get()
                    on:input=move |ev| date_end.set(event_target_value(&ev))
                />
                <button type="submit" class=BUTTON_CLASS disabled=move || busy.get()>
                    "Create step"
                </button>
            </form>

            <div class="flex gap-2">
                <select
                    class=INPUT_CLASS
                    on:change=move |ev| copy_target.set(parse_id(&event_target_value(&ev)))
                >
                    <option value="">"Copy planned to…"</option>
                    {move || {
                        let chosen = copy_target.get();
                        app.with(|s| options_view(render::copy_target_options(s, chosen)))
                    }}
                </select>
                <button
                    type="button"
                    class=BUTTON_CLASS
                    disabled=move || busy.get()
                    on:click=on_copy
                >
                    "Copy planned"
                </button>
            </div>
        </section>
    }
}
