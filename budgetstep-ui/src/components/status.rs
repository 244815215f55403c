//! Status line.

use leptos::*;

use crate::state::use_ui_state;

#[component]
pub fn StatusLine() -> impl IntoView {
    let state = use_ui_state();
    let status = state.status;
    let busy = state.busy;

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <span class=move || if status.with(|s| s.ok) { "text-gray-200" } else { "text-red-400" }>
                    {move || status.with(|s| s.message.clone())}
                </span>
                <Show when=move || busy.get()>
                    <span class="text-primary-400">"Loading..."</span>
                </Show>
            </div>
        </footer>
    }
}
