//! # budgetstep
//!
//! Client core for a step-based household budgeting service. A budget owns
//! accounts, categories and steps (date-bounded periods such as a month);
//! each step holds planned and actual operations.
//!
//! ## Modules
//!
//! - [`client`]: typed REST client over a pluggable [`client::Transport`]
//! - [`state`]: the mirrored snapshot and its selection rules
//! - [`forms`]: form input and the request bodies built from it
//! - [`session`]: one handler per user action
//! - [`render`]: view-models for any front end
//! - [`store`]: persistence of the last selection
//!
//! The `native` feature (on by default) adds the reqwest transport, the
//! file-backed store, [`config`] and the `budgetstep` binary. The browser
//! front end builds this crate without it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use budgetstep::client::{Api, HttpTransport};
//! use budgetstep::forms::BudgetForm;
//! use budgetstep::session::Session;
//! use budgetstep::state::AppState;
//! use budgetstep::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = Session::new(
//!         Api::new(HttpTransport::new("http://localhost:8000/api")),
//!         MemoryStore::new(),
//!     );
//!
//!     let loaded = session.reload_all(AppState::default()).await;
//!     let form = BudgetForm {
//!         name: "Home".to_string(),
//!         ..Default::default()
//!     };
//!     let outcome = session.create_budget(loaded.state, &form).await;
//!     println!("{}", outcome.status.message);
//! }
//! ```

pub mod client;
#[cfg(feature = "native")]
pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod render;
pub mod sequence;
pub mod session;
pub mod state;
pub mod store;

// Re-export top-level types for convenience
pub use client::{Api, ApiRequest, Body, Method, RawResponse, Transport};
pub use error::{ClientError, ClientResult, ValidationError};
pub use forms::{AccountForm, BudgetForm, CategoryForm, FormMode, OperationForm, StepForm};
pub use sequence::{RequestSequencer, RequestToken};
pub use session::{Outcome, Session, Status};
pub use state::{AppState, Selection, StepView};
pub use store::{MemoryStore, SelectionStore, StoreError};

#[cfg(feature = "native")]
pub use client::HttpTransport;
#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
#[cfg(feature = "native")]
pub use store::FileStore;
