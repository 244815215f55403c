//! Application State
//!
//! Snapshot of everything the client mirrors from the service for the
//! selected budget. Handlers own a snapshot while they run and replace whole
//! lists after every server write; nothing is patched incrementally.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{
    scoped_to, Account, Budget, Category, Id, NewOperation, Operation, Step, Summary,
};

/// Budget and step the user last selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub budget_id: Option<Id>,
    #[serde(default)]
    pub step_id: Option<Id>,
}

/// Summary and feed of the current step
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub step_id: Id,
    pub summary: Summary,
    pub feed: Vec<Operation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Every budget, server order
    pub budgets: Vec<Budget>,
    /// Accounts of the current budget only
    pub accounts: Vec<Account>,
    /// Categories of the current budget only
    pub categories: Vec<Category>,
    /// Steps of the current budget only
    pub steps: Vec<Step>,
    pub current_budget_id: Option<Id>,
    pub current_step_id: Option<Id>,
    pub step_view: Option<StepView>,
}

impl AppState {
    pub fn selection(&self) -> Selection {
        Selection {
            budget_id: self.current_budget_id,
            step_id: self.current_step_id,
        }
    }

    pub fn current_budget(&self) -> Option<&Budget> {
        let id = self.current_budget_id?;
        self.budgets.iter().find(|b| b.id == id)
    }

    pub fn current_step(&self) -> Option<&Step> {
        let id = self.current_step_id?;
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn budget(&self, id: Id) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Step of the current budget
    pub fn step(&self, id: Id) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn account(&self, id: Id) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn category(&self, id: Id) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Every account and category an operation names must belong to the
    /// current budget
    pub fn check_operation(&self, operation: &NewOperation) -> Result<(), ValidationError> {
        let accounts = std::iter::once(operation.account_id).chain(operation.account_id_to);
        for id in accounts {
            if self.account(id).is_none() {
                return Err(ValidationError::UnknownAccount(id));
            }
        }
        match operation.category_id {
            Some(id) if self.category(id).is_none() => Err(ValidationError::UnknownCategory(id)),
            _ => Ok(()),
        }
    }

    /// Replace the budget list and pick the current budget.
    ///
    /// A change of budget drops everything scoped to the previous one.
    pub fn replace_budgets(&mut self, budgets: Vec<Budget>, preferred: Option<Id>) {
        let ids: Vec<Id> = budgets.iter().map(|b| b.id).collect();
        let next = resolve_selection(preferred, &ids);
        self.budgets = budgets;
        if next != self.current_budget_id {
            self.select_budget(next);
        }
    }

    /// Switch budget, invalidating the step selection and scoped lists
    pub fn select_budget(&mut self, budget_id: Option<Id>) {
        self.current_budget_id = budget_id;
        self.accounts.clear();
        self.categories.clear();
        self.steps.clear();
        self.current_step_id = None;
        self.step_view = None;
    }

    /// Replace accounts and categories, keeping only the current budget's
    pub fn replace_catalog(&mut self, accounts: Vec<Account>, categories: Vec<Category>) {
        self.accounts = scoped_to(accounts, self.current_budget_id);
        self.categories = scoped_to(categories, self.current_budget_id);
    }

    /// Replace the step list and pick the current step
    pub fn replace_steps(&mut self, steps: Vec<Step>, preferred: Option<Id>) {
        self.steps = scoped_to(steps, self.current_budget_id);
        let ids: Vec<Id> = self.steps.iter().map(|s| s.id).collect();
        let next = resolve_selection(preferred, &ids);
        if next != self.current_step_id {
            self.step_view = None;
        }
        self.current_step_id = next;
    }

    /// Switch step; the step view is reloaded separately
    pub fn select_step(&mut self, step_id: Option<Id>) {
        if step_id != self.current_step_id {
            self.step_view = None;
        }
        self.current_step_id = step_id;
    }
}

/// Highest id in `ids`
pub fn newest_id(ids: &[Id]) -> Option<Id> {
    ids.iter().copied().max()
}

/// `preferred` when it is still among `ids`, otherwise the newest id
pub fn resolve_selection(preferred: Option<Id>, ids: &[Id]) -> Option<Id> {
    match preferred {
        Some(id) if ids.contains(&id) => Some(id),
        _ => newest_id(ids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Granularity;
    use chrono::NaiveDate;

    fn budget(id: Id) -> Budget {
        Budget {
            id,
            name: format!("Budget {}", id),
            currency: "EUR".to_string(),
            owner_user_id: 1,
        }
    }

    fn step(id: Id, budget_id: Id) -> Step {
        Step {
            id,
            budget_id,
            name: format!("Step {}", id),
            date_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            date_end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            granularity: Granularity::Month,
        }
    }

    #[test]
    fn test_resolve_selection() {
        assert_eq!(resolve_selection(Some(2), &[1, 2, 3]), Some(2));
        assert_eq!(resolve_selection(Some(9), &[1, 3, 2]), Some(3));
        assert_eq!(resolve_selection(None, &[4, 1]), Some(4));
        assert_eq!(resolve_selection(Some(1), &[]), None);
    }

    #[test]
    fn test_replace_budgets_defaults_to_newest() {
        let mut state = AppState::default();
        state.replace_budgets(vec![budget(1), budget(3), budget(2)], None);
        assert_eq!(state.current_budget_id, Some(3));

        state.replace_budgets(vec![budget(1), budget(3), budget(2)], Some(1));
        assert_eq!(state.current_budget_id, Some(1));
    }

    #[test]
    fn test_budget_change_invalidates_step() {
        let mut state = AppState::default();
        state.replace_budgets(vec![budget(1), budget(2)], Some(1));
        state.replace_steps(vec![step(10, 1), step(11, 1)], None);
        assert_eq!(state.current_step_id, Some(11));

        state.select_budget(Some(2));
        assert_eq!(state.current_step_id, None);
        assert!(state.steps.is_empty());
        assert!(state.step_view.is_none());

        state.replace_steps(vec![step(20, 2), step(22, 2), step(21, 2)], Some(11));
        assert_eq!(state.current_step_id, Some(22));
    }

    #[test]
    fn test_same_budget_keeps_scoped_lists() {
        let mut state = AppState::default();
        state.replace_budgets(vec![budget(1)], None);
        state.replace_steps(vec![step(5, 1)], None);

        state.replace_budgets(vec![budget(1)], Some(1));
        assert_eq!(state.current_step_id, Some(5));
        assert_eq!(state.steps.len(), 1);
    }

    #[test]
    fn test_replace_steps_drops_foreign_steps() {
        let mut state = AppState::default();
        state.replace_budgets(vec![budget(1), budget(2)], Some(1));
        state.replace_steps(vec![step(5, 1), step(9, 2)], None);
        assert_eq!(state.steps.len(), 1);
        assert_eq!(state.current_step_id, Some(5));
    }

    #[test]
    fn test_no_budget_means_empty_scope() {
        let mut state = AppState::default();
        state.replace_budgets(Vec::new(), Some(4));
        assert_eq!(state.current_budget_id, None);
        state.replace_steps(vec![step(1, 1)], None);
        assert!(state.steps.is_empty());
        assert_eq!(state.selection(), Selection::default());
    }
}
