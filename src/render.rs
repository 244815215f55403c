//! Render View-Models
//!
//! Projects an [`AppState`] snapshot into the lists, selects and text
//! panels every front end draws. Selects are rebuilt in full on each call.
//! Budgets and steps are listed newest first; accounts, categories and
//! operations keep server order.

use serde::Serialize;

use crate::model::{Id, Operation, Sign};
use crate::state::AppState;

/// Text shown when there is nothing to summarize
pub const EMPTY_PANEL: &str = "–";

/// One `<option>` of a select
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: Id,
    pub label: String,
    pub selected: bool,
}

/// Budget selector, newest first
pub fn budget_options(state: &AppState) -> Vec<SelectOption> {
    let mut budgets: Vec<_> = state.budgets.iter().collect();
    budgets.sort_by(|a, b| b.id.cmp(&a.id));
    budgets
        .into_iter()
        .map(|b| SelectOption {
            value: b.id,
            label: format!("#{} — {} ({})", b.id, b.name, b.currency),
            selected: state.current_budget_id == Some(b.id),
        })
        .collect()
}

/// Step selector, newest first
pub fn step_options(state: &AppState) -> Vec<SelectOption> {
    let mut steps: Vec<_> = state.steps.iter().collect();
    steps.sort_by(|a, b| b.id.cmp(&a.id));
    steps
        .into_iter()
        .map(|s| SelectOption {
            value: s.id,
            label: format!("#{} {} {}..{}", s.id, s.name, s.date_start, s.date_end),
            selected: state.current_step_id == Some(s.id),
        })
        .collect()
}

/// Target selector for copying planned operations, newest first.
///
/// `chosen` is the target the user picked, if any.
pub fn copy_target_options(state: &AppState, chosen: Option<Id>) -> Vec<SelectOption> {
    let mut steps: Vec<_> = state.steps.iter().collect();
    steps.sort_by(|a, b| b.id.cmp(&a.id));
    steps
        .into_iter()
        .map(|s| SelectOption {
            value: s.id,
            label: format!("#{} {}", s.id, s.name),
            selected: chosen == Some(s.id),
        })
        .collect()
}

pub fn account_lines(state: &AppState) -> Vec<String> {
    state
        .accounts
        .iter()
        .map(|a| format!("#{} {} ({})", a.id, a.name, a.currency))
        .collect()
}

pub fn category_lines(state: &AppState) -> Vec<String> {
    state
        .categories
        .iter()
        .map(|c| format!("#{} {}", c.id, c.name))
        .collect()
}

/// Account select of the operation form (source or destination)
pub fn account_options(state: &AppState, chosen: Option<Id>) -> Vec<SelectOption> {
    state
        .accounts
        .iter()
        .map(|a| SelectOption {
            value: a.id,
            label: format!("{} (#{})", a.name, a.id),
            selected: chosen == Some(a.id),
        })
        .collect()
}

pub fn category_options(state: &AppState, chosen: Option<Id>) -> Vec<SelectOption> {
    state
        .categories
        .iter()
        .map(|c| SelectOption {
            value: c.id,
            label: format!("{} (#{})", c.name, c.id),
            selected: chosen == Some(c.id),
        })
        .collect()
}

/// Income, expense and net of the current step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPanel {
    pub income: String,
    pub expense: String,
    pub net: String,
}

impl SummaryPanel {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Income: {}", self.income),
            format!("Expense: {}", self.expense),
            format!("Net: {}", self.net),
        ]
    }
}

pub fn summary_panel(state: &AppState) -> Option<SummaryPanel> {
    let view = state.step_view.as_ref()?;
    Some(SummaryPanel {
        income: view.summary.total_income.to_string(),
        expense: view.summary.total_expense.to_string(),
        net: view.summary.net.to_string(),
    })
}

/// Summary as the three-line text block, or [`EMPTY_PANEL`]
pub fn summary_text(state: &AppState) -> String {
    match summary_panel(state) {
        Some(panel) => panel.lines().join("\n"),
        None => EMPTY_PANEL.to_string(),
    }
}

/// One entry of the operation feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedLine {
    /// `[kind/sign] amount currency`
    pub title: String,
    pub details: Vec<String>,
}

impl FeedLine {
    pub fn text(&self) -> String {
        if self.details.is_empty() {
            self.title.clone()
        } else {
            format!("{} — {}", self.title, self.details.join(" "))
        }
    }
}

pub fn feed_lines(state: &AppState) -> Vec<FeedLine> {
    state
        .step_view
        .as_ref()
        .map(|view| view.feed.iter().map(|op| feed_line(state, op)).collect())
        .unwrap_or_default()
}

/// Format one operation: transfers show both accounts, others the category
pub fn feed_line(state: &AppState, op: &Operation) -> FeedLine {
    let title = format!("[{}/{}] {} {}", op.kind, op.sign, op.amount, op.currency);
    let source = op.account_id.map(|id| account_label(state, id));

    let mut details = Vec::new();
    match op.sign {
        Sign::Transfer => {
            let destination = op.account_id_to.map(|id| account_label(state, id));
            match (source, destination) {
                (Some(src), Some(dst)) => details.push(format!("{} → {}", src, dst)),
                (Some(src), None) => details.push(src),
                (None, Some(dst)) => details.push(format!("→ {}", dst)),
                (None, None) => {}
            }
        }
        Sign::Income | Sign::Expense => {
            details.extend(source);
            details.extend(op.category_id.map(|id| category_label(state, id)));
        }
    }
    if let Some(plan) = op.planned_ref_id {
        details.push(format!("plan#{}", plan));
    }
    if let Some(comment) = op.comment.as_deref().filter(|c| !c.is_empty()) {
        details.push(format!("“{}”", comment));
    }

    FeedLine { title, details }
}

/// Every panel at once, for text and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panels {
    pub budgets: Vec<SelectOption>,
    pub steps: Vec<SelectOption>,
    pub accounts: Vec<String>,
    pub categories: Vec<String>,
    pub summary: Option<SummaryPanel>,
    pub feed: Vec<FeedLine>,
}

pub fn panels(state: &AppState) -> Panels {
    Panels {
        budgets: budget_options(state),
        steps: step_options(state),
        accounts: account_lines(state),
        categories: category_lines(state),
        summary: summary_panel(state),
        feed: feed_lines(state),
    }
}

fn account_label(state: &AppState, id: Id) -> String {
    state
        .account(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("acc#{}", id))
}

fn category_label(state: &AppState, id: Id) -> String {
    state
        .category(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("cat#{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Account, Budget, Category, Granularity, OperationKind, Step, Summary};
    use crate::state::StepView;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state.replace_budgets(
            vec![
                Budget { id: 1, name: "Old".into(), currency: "USD".into(), owner_user_id: 1 },
                Budget { id: 2, name: "Home".into(), currency: "EUR".into(), owner_user_id: 1 },
            ],
            Some(2),
        );
        state.replace_catalog(
            vec![
                Account { id: 5, budget_id: 2, name: "Cash".into(), currency: "EUR".into() },
                Account { id: 6, budget_id: 1, name: "Other".into(), currency: "USD".into() },
                Account { id: 4, budget_id: 2, name: "Bank".into(), currency: "EUR".into() },
            ],
            vec![
                Category { id: 7, budget_id: 2, name: "Food".into() },
                Category { id: 8, budget_id: 1, name: "Fuel".into() },
            ],
        );
        state.replace_steps(
            vec![
                Step {
                    id: 10,
                    budget_id: 2,
                    name: "Jan".into(),
                    date_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    date_end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                    granularity: Granularity::Month,
                },
                Step {
                    id: 12,
                    budget_id: 2,
                    name: "Feb".into(),
                    date_start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    date_end: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                    granularity: Granularity::Month,
                },
            ],
            None,
        );
        state
    }

    fn operation(sign: Sign) -> Operation {
        Operation {
            id: 1,
            step_id: 12,
            kind: OperationKind::Actual,
            sign,
            amount: "25.00".parse().unwrap(),
            currency: "EUR".into(),
            account_id: Some(5),
            account_id_to: None,
            category_id: None,
            comment: None,
            planned_ref_id: None,
        }
    }

    #[test]
    fn test_budget_options_newest_first() {
        let options = budget_options(&sample_state());
        assert_eq!(options[0].label, "#2 — Home (EUR)");
        assert!(options[0].selected);
        assert_eq!(options[1].value, 1);
        assert!(!options[1].selected);
    }

    #[test]
    fn test_step_and_copy_options() {
        let state = sample_state();
        let steps = step_options(&state);
        assert_eq!(steps[0].label, "#12 Feb 2024-02-01..2024-02-29");
        assert!(steps[0].selected);

        let targets = copy_target_options(&state, Some(10));
        assert_eq!(targets.iter().map(|o| o.label.as_str()).collect::<Vec<_>>(), vec!["#12 Feb", "#10 Jan"]);
        assert!(targets[1].selected);
    }

    #[test]
    fn test_lists_only_show_current_budget() {
        let state = sample_state();
        assert_eq!(account_lines(&state), vec!["#5 Cash (EUR)", "#4 Bank (EUR)"]);
        assert_eq!(category_lines(&state), vec!["#7 Food"]);

        let accounts = account_options(&state, Some(4));
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].label, "Bank (#4)");
        assert!(accounts[1].selected);
        assert_eq!(category_options(&state, None)[0].label, "Food (#7)");
    }

    #[test]
    fn test_summary_text() {
        let mut state = sample_state();
        assert_eq!(summary_text(&state), EMPTY_PANEL);

        state.step_view = Some(StepView {
            step_id: 12,
            summary: Summary {
                total_income: "100.00".parse().unwrap(),
                total_expense: Decimal::ZERO,
                net: "100.00".parse().unwrap(),
            },
            feed: Vec::new(),
        });
        assert_eq!(summary_text(&state), "Income: 100.00\nExpense: 0\nNet: 100.00");
    }

    #[test]
    fn test_feed_line_transfer_shows_both_accounts() {
        let state = sample_state();
        let mut op = operation(Sign::Transfer);
        op.account_id_to = Some(99);
        op.kind = OperationKind::Planned;

        let line = feed_line(&state, &op);
        assert_eq!(line.text(), "[planned/transfer] 25.00 EUR — Cash → acc#99");
    }

    #[test]
    fn test_feed_line_expense_shows_category_and_comment() {
        let state = sample_state();
        let mut op = operation(Sign::Expense);
        op.category_id = Some(7);
        op.comment = Some("groceries".into());
        op.planned_ref_id = Some(3);

        let line = feed_line(&state, &op);
        assert_eq!(line.title, "[actual/expense] 25.00 EUR");
        assert_eq!(line.details, vec!["Cash", "Food", "plan#3", "“groceries”"]);
    }

    #[test]
    fn test_feed_lines_empty_without_step_view() {
        assert!(feed_lines(&sample_state()).is_empty());
    }

    #[test]
    fn test_panels_serialize() {
        let panels = panels(&sample_state());
        assert_eq!(panels.accounts.len(), 2);
        assert!(panels.summary.is_none());

        let json = serde_json::to_value(&panels).unwrap();
        assert_eq!(json["budgets"][0]["value"], 2);
        assert_eq!(json["summary"], serde_json::Value::Null);
    }
}
