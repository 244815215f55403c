//! Summary and operation feed of the current step.

use budgetstep::render;
use leptos::*;

use super::CARD_CLASS;
use crate::state::use_ui_state;

#[component]
pub fn SummaryPanel() -> impl IntoView {
    let app = use_ui_state().app;

    view! {
        <section class=CARD_CLASS>
            <h2 class="text-lg font-semibold">"Summary"</h2>
            <pre class="text-sm font-mono">{move || app.with(render::summary_text)}</pre>

            <h2 class="text-lg font-semibold">"Feed"</h2>
            <ul class="text-sm space-y-1">
                {move || {
                    app.with(render::feed_lines)
                        .into_iter()
                        .map(|line| view! {
                            <li>
                                <span class="font-medium">{line.title}</span>
                                {(!line.details.is_empty())
                                    .then(|| format!(" — {}", line.details.join(" ")))}
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
