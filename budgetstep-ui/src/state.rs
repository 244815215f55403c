//! UI State
//!
//! Reactive wrapper around the core snapshot. Every action is dispatched
//! through [`UiState::dispatch`], which hands the current snapshot to a
//! handler and applies the result only if no newer action started since.

use std::future::Future;
use std::rc::Rc;

use budgetstep::session::{Outcome, Session, Status};
use budgetstep::state::AppState;
use budgetstep::{Api, RequestSequencer};
use leptos::*;

use crate::api::GlooTransport;
use crate::storage::LocalStorageStore;

pub type UiSession = Session<GlooTransport, LocalStorageStore>;

/// Application state provided to all components
#[derive(Clone)]
pub struct UiState {
    /// Last applied snapshot
    pub app: RwSignal<AppState>,
    /// Status line
    pub status: RwSignal<Status>,
    /// An action is in flight
    pub busy: RwSignal<bool>,
    session: Rc<UiSession>,
    sequencer: Rc<RequestSequencer>,
}

/// Provide UI state to the component tree
pub fn provide_ui_state() -> UiState {
    let session = Session::new(Api::new(GlooTransport::from_storage()), LocalStorageStore);
    let state = UiState {
        app: create_rw_signal(AppState::default()),
        status: create_rw_signal(Status::ok("Loading…")),
        busy: create_rw_signal(false),
        session: Rc::new(session),
        sequencer: Rc::new(RequestSequencer::new()),
    };
    provide_context(state.clone());
    state
}

pub fn use_ui_state() -> UiState {
    expect_context::<UiState>()
}

impl UiState {
    /// Run `action` on the current snapshot; stale results are dropped
    pub fn dispatch<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<UiSession>, AppState) -> Fut + 'static,
        Fut: Future<Output = Outcome> + 'static,
    {
        let token = self.sequencer.begin();
        let snapshot = self.app.get_untracked();
        let session = Rc::clone(&self.session);
        let sequencer = Rc::clone(&self.sequencer);
        let (app, status, busy) = (self.app, self.status, self.busy);

        busy.set(true);
        spawn_local(async move {
            let outcome = action(session, snapshot).await;
            if !sequencer.is_current(token) {
                web_sys::console::log_1(&format!("Dropped stale result #{}", token.value()).into());
                return;
            }
            if !outcome.status.ok {
                web_sys::console::warn_1(&outcome.status.message.clone().into());
            }
            app.set(outcome.state);
            status.set(outcome.status);
            busy.set(false);
        });
    }

    /// Health check; leaves the snapshot untouched
    pub fn check_health(&self) {
        self.dispatch(|session, state| async move {
            let status = session.check_health().await;
            Outcome { state, status }
        });
    }

    pub fn reload_all(&self) {
        self.dispatch(|session, state| async move { session.reload_all(state).await });
    }
}
