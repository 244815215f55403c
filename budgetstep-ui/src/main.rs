//! Budgetstep Browser Client
//!
//! Single-page front end for a step-based household budgeting service,
//! built with Leptos (CSR) and compiled to WebAssembly.
//!
//! # Architecture
//!
//! All behavior lives in the `budgetstep` core: handlers, selection rules
//! and view-models. This crate supplies the browser pieces (a gloo-net
//! transport and a local-storage selection store) and draws the
//! view-models as DOM.

use leptos::*;

mod api;
mod app;
mod components;
mod state;
mod storage;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
