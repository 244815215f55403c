//! Event Handlers
//!
//! One handler per user action. Each takes an owned [`AppState`] snapshot,
//! talks to the service through [`Api`], replaces whole lists after every
//! write, and hands back the new snapshot with a status message. Errors
//! never escape a handler: they become the status line, and the snapshot is
//! returned as far as the reload got.

use chrono::NaiveDate;

use crate::client::{Api, Transport};
use crate::error::{ClientResult, ValidationError};
use crate::forms::{AccountForm, BudgetForm, CategoryForm, OperationForm, StepForm};
use crate::model::Id;
use crate::state::{AppState, Selection, StepView};
use crate::store::{self, SelectionStore};

/// Human-readable outcome of the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub ok: bool,
}

impl Status {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ok: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ok: false,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::ok("")
    }
}

/// New snapshot plus status, returned by every handler
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: AppState,
    pub status: Status,
}

/// Handlers bound to one API and one selection store
pub struct Session<T, S> {
    api: Api<T>,
    store: S,
}

impl<T: Transport, S: SelectionStore> Session<T, S> {
    pub fn new(api: Api<T>, store: S) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ping `/health`
    pub async fn check_health(&self) -> Status {
        match self.api.health().await {
            Ok(health) => Status::ok(format!("API OK: {}", health.status)),
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                Status::error(format!("API error: {}", e))
            }
        }
    }

    /// Page-load sequence: everything, restoring the saved selection when valid
    pub async fn reload_all(&self, mut state: AppState) -> Outcome {
        let saved = store::load_or_default(&self.store);
        let result = self.load_everything(&mut state, saved).await;
        self.finish(state, "Reload", result.map(|_| "Ready".to_string()))
    }

    pub async fn create_budget(&self, mut state: AppState, form: &BudgetForm) -> Outcome {
        let result = self.try_create_budget(&mut state, form).await;
        self.finish(state, "Create budget", result)
    }

    pub async fn add_account(&self, mut state: AppState, form: &AccountForm) -> Outcome {
        let result = self.try_add_account(&mut state, form).await;
        self.finish(state, "Add account", result)
    }

    pub async fn add_category(&self, mut state: AppState, form: &CategoryForm) -> Outcome {
        let result = self.try_add_category(&mut state, form).await;
        self.finish(state, "Add category", result)
    }

    /// Create a month step; blank fields default to the month of `today`
    pub async fn create_step(&self, mut state: AppState, form: &StepForm, today: NaiveDate) -> Outcome {
        let result = self.try_create_step(&mut state, form, today).await;
        self.finish(state, "Create step", result)
    }

    /// Switch budget; the step selection is re-derived from the new budget
    pub async fn change_budget(&self, mut state: AppState, budget_id: Id) -> Outcome {
        let result = self.try_change_budget(&mut state, budget_id).await;
        self.finish(state, "Change budget", result.map(|_| "Ready".to_string()))
    }

    /// Switch to a step of the current budget
    pub async fn change_step(&self, mut state: AppState, step_id: Id) -> Outcome {
        let result = self.try_change_step(&mut state, step_id).await;
        self.finish(state, "Change step", result.map(|_| "Ready".to_string()))
    }

    /// Reload summary and feed of the current step
    pub async fn refresh_step(&self, mut state: AppState) -> Outcome {
        let result = self.load_step_view(&mut state).await;
        self.finish(state, "Refresh step", result.map(|_| "Step refreshed".to_string()))
    }

    pub async fn add_operation(&self, mut state: AppState, form: &OperationForm) -> Outcome {
        let result = self.try_add_operation(&mut state, form).await;
        self.finish(state, "Add operation", result)
    }

    /// Copy the current step's planned operations into `to_step_id`
    pub async fn copy_planned(&self, mut state: AppState, to_step_id: Option<Id>) -> Outcome {
        let result = self.try_copy_planned(&mut state, to_step_id).await;
        self.finish(state, "Copy planned operations", result)
    }

    async fn try_create_budget(&self, state: &mut AppState, form: &BudgetForm) -> ClientResult<String> {
        let request = form.to_request()?;
        let budget = self.api.create_budget(&request).await?;
        let selection = Selection {
            budget_id: Some(budget.id),
            step_id: None,
        };
        self.load_everything(state, selection).await?;
        Ok(format!("Budget created: #{} {}", budget.id, budget.name))
    }

    async fn try_add_account(&self, state: &mut AppState, form: &AccountForm) -> ClientResult<String> {
        let request = form.to_request(state.current_budget_id)?;
        let account = self.api.create_account(&request).await?;
        self.load_catalog(state).await?;
        Ok(format!("Account added: #{} {}", account.id, account.name))
    }

    async fn try_add_category(&self, state: &mut AppState, form: &CategoryForm) -> ClientResult<String> {
        let request = form.to_request(state.current_budget_id)?;
        let category = self.api.create_category(&request).await?;
        self.load_catalog(state).await?;
        Ok(format!("Category added: #{} {}", category.id, category.name))
    }

    async fn try_create_step(
        &self,
        state: &mut AppState,
        form: &StepForm,
        today: NaiveDate,
    ) -> ClientResult<String> {
        let request = form.to_request(state.current_budget_id, today)?;
        let step = self.api.create_step(&request).await?;
        self.load_steps(state, None).await?;
        self.load_step_view(state).await?;
        Ok(format!("Step created: #{} {}", step.id, step.name))
    }

    async fn try_change_budget(&self, state: &mut AppState, budget_id: Id) -> ClientResult<()> {
        if state.budget(budget_id).is_none() {
            return Err(ValidationError::UnknownBudget(budget_id).into());
        }
        state.select_budget(Some(budget_id));
        self.reload_budget_scope(state).await
    }

    async fn try_change_step(&self, state: &mut AppState, step_id: Id) -> ClientResult<()> {
        if state.step(step_id).is_none() {
            return Err(ValidationError::UnknownStep(step_id).into());
        }
        state.select_step(Some(step_id));
        self.load_step_view(state).await
    }

    async fn try_add_operation(&self, state: &mut AppState, form: &OperationForm) -> ClientResult<String> {
        let request = form.to_request(state.current_step_id)?;
        state.check_operation(&request)?;
        let operation = self.api.create_operation(&request).await?;
        self.load_step_view(state).await?;
        Ok(format!("Operation added: #{}", operation.id))
    }

    async fn try_copy_planned(&self, state: &mut AppState, to_step_id: Option<Id>) -> ClientResult<String> {
        let from = state.current_step_id.ok_or(ValidationError::NoStep)?;
        let to = to_step_id.ok_or(ValidationError::NoTargetStep)?;
        if state.step(to).is_none() {
            return Err(ValidationError::UnknownStep(to).into());
        }
        let result = self.api.copy_planned(from, to).await?;
        self.load_step_view(state).await?;
        Ok(format!("Copied planned operations: {}", result.copied))
    }

    async fn load_everything(&self, state: &mut AppState, preferred: Selection) -> ClientResult<()> {
        let budgets = self.api.budgets().await?;
        state.replace_budgets(budgets, preferred.budget_id);
        self.load_catalog(state).await?;

        // A saved step only counts inside the budget it was saved with
        let preferred_step = if state.current_budget_id == preferred.budget_id {
            preferred.step_id
        } else {
            None
        };
        self.load_steps(state, preferred_step).await?;
        self.load_step_view(state).await
    }

    async fn reload_budget_scope(&self, state: &mut AppState) -> ClientResult<()> {
        self.load_catalog(state).await?;
        self.load_steps(state, None).await?;
        self.load_step_view(state).await
    }

    async fn load_catalog(&self, state: &mut AppState) -> ClientResult<()> {
        if state.current_budget_id.is_none() {
            state.replace_catalog(Vec::new(), Vec::new());
            return Ok(());
        }
        let accounts = self.api.accounts().await?;
        let categories = self.api.categories().await?;
        state.replace_catalog(accounts, categories);
        Ok(())
    }

    async fn load_steps(&self, state: &mut AppState, preferred: Option<Id>) -> ClientResult<()> {
        let steps = match state.current_budget_id {
            Some(budget_id) => self.api.steps(budget_id).await?,
            None => Vec::new(),
        };
        state.replace_steps(steps, preferred);
        Ok(())
    }

    async fn load_step_view(&self, state: &mut AppState) -> ClientResult<()> {
        let Some(step_id) = state.current_step_id else {
            state.step_view = None;
            return Ok(());
        };
        let summary = self.api.summary(step_id).await?;
        let feed = self.api.feed(step_id).await?;
        state.step_view = Some(StepView {
            step_id,
            summary,
            feed,
        });
        Ok(())
    }

    fn finish(&self, state: AppState, action: &str, result: ClientResult<String>) -> Outcome {
        store::persist(&self.store, &state.selection());
        let status = match result {
            Ok(message) => {
                tracing::info!(action, "{}", message);
                Status::ok(message)
            }
            Err(e) => {
                tracing::warn!(action, error = %e, "Action failed");
                Status::error(format!("{} failed: {}", action, e))
            }
        };
        Outcome { state, status }
    }
}
