//! Header with API controls.

use leptos::*;

use super::{BUTTON_CLASS, INPUT_CLASS};
use crate::api;
use crate::state::use_ui_state;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_ui_state();
    let (api_base, set_api_base) = create_signal(api::get_api_base());

    let health_state = state.clone();
    let reload_state = state.clone();

    let save_base = move |_: web_sys::MouseEvent| {
        api::set_api_base(&api_base.get_untracked());
        // The transport reads the base once; start over with the new one
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <header class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4 h-16 flex items-center justify-between">
                <span class="text-xl font-bold text-white">"Budgetstep"</span>

                <div class="flex items-center space-x-2">
                    <input
                        type="text"
                        class=INPUT_CLASS
                        prop:value=move || api_base.get()
                        on:input=move |ev| set_api_base.set(event_target_value(&ev))
                    />
                    <button type="button" class=BUTTON_CLASS on:click=save_base>"Use API"</button>
                    <button
                        type="button"
                        class=BUTTON_CLASS
                        on:click=move |_| health_state.check_health()
                    >
                        "Check API"
                    </button>
                    <button
                        type="button"
                        class=BUTTON_CLASS
                        disabled=move || state.busy.get()
                        on:click=move |_| reload_state.reload_all()
                    >
                        "Reload everything"
                    </button>
                </div>
            </div>
        </header>
    }
}
