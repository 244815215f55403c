//! App Root Component
//!
//! Provides the UI state, lays out the panels and runs the page-load
//! sequence once on mount.

use leptos::*;

use crate::components::{
    BudgetPanel, CatalogPanel, Header, OperationPanel, StatusLine, StepPanel, SummaryPanel,
};
use crate::state::provide_ui_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_ui_state();
    state.reload_all();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Header />

            <main class="flex-1 container mx-auto px-4 py-8 pb-24 grid gap-4 md:grid-cols-2">
                <div class="space-y-4">
                    <BudgetPanel />
                    <CatalogPanel />
                </div>
                <div class="space-y-4">
                    <StepPanel />
                    <OperationPanel />
                    <SummaryPanel />
                </div>
            </main>

            <StatusLine />
        </div>
    }
}
