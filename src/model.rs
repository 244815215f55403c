//! Budget Entities
//!
//! Read-only mirrors of the entities owned by the budgeting service, plus
//! the request bodies the client posts to create them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier
pub type Id = i64;

/// Currency used when a form leaves it blank
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Owner assigned to new budgets when a form leaves it blank
pub const DEFAULT_OWNER_ID: Id = 1;

/// Root aggregate; selecting one scopes every other entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Id,
    pub name: String,
    pub currency: String,
    pub owner_user_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub budget_id: Id,
    pub name: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub budget_id: Id,
    pub name: String,
}

/// Length of a step's period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

/// A bounded time period within a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: Id,
    pub budget_id: Id,
    pub name: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub granularity: Granularity,
}

/// Whether an operation is a forecast or a recorded fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Planned,
    Actual,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Planned => "planned",
            OperationKind::Actual => "actual",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "planned" => Ok(OperationKind::Planned),
            "actual" => Ok(OperationKind::Actual),
            other => Err(format!("unknown operation kind '{}'", other)),
        }
    }
}

/// Direction of money for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Income,
    #[default]
    Expense,
    Transfer,
}

impl Sign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Income => "income",
            Sign::Expense => "expense",
            Sign::Transfer => "transfer",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(Sign::Income),
            "expense" => Ok(Sign::Expense),
            "transfer" => Ok(Sign::Transfer),
            other => Err(format!("unknown sign '{}'", other)),
        }
    }
}

/// A single recorded income, expense or transfer within a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: Id,
    pub step_id: Id,
    pub kind: OperationKind,
    pub sign: Sign,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub account_id: Option<Id>,
    /// Destination account, transfers only
    #[serde(default)]
    pub account_id_to: Option<Id>,
    /// Absent for transfers
    #[serde(default)]
    pub category_id: Option<Id>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Planned operation this actual one realizes
    #[serde(default)]
    pub planned_ref_id: Option<Id>,
}

/// Totals for a step, computed by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub total_income: Decimal,
    #[serde(default)]
    pub total_expense: Decimal,
    #[serde(default)]
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
}

/// Result of copying planned operations between steps
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CopyResult {
    #[serde(default)]
    pub copied: u64,
}

/// Entities that live inside exactly one budget
pub trait BudgetScoped {
    fn budget_id(&self) -> Id;
}

impl BudgetScoped for Account {
    fn budget_id(&self) -> Id {
        self.budget_id
    }
}

impl BudgetScoped for Category {
    fn budget_id(&self) -> Id {
        self.budget_id
    }
}

impl BudgetScoped for Step {
    fn budget_id(&self) -> Id {
        self.budget_id
    }
}

/// Keep only the items belonging to `budget_id`, preserving order
pub fn scoped_to<T: BudgetScoped>(items: Vec<T>, budget_id: Option<Id>) -> Vec<T> {
    match budget_id {
        Some(id) => items.into_iter().filter(|item| item.budget_id() == id).collect(),
        None => Vec::new(),
    }
}

// ============ Request Bodies ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBudget {
    pub name: String,
    pub currency: String,
    pub owner_user_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAccount {
    pub budget_id: Id,
    pub name: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub budget_id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStep {
    pub budget_id: Id,
    pub granularity: Granularity,
    pub name: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
}

/// Operation payload; the optional fields are omitted rather than sent as null
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOperation {
    pub step_id: Id,
    pub kind: OperationKind,
    pub sign: Sign,
    /// Two-decimal string, e.g. "100.00"
    pub amount: String,
    pub currency: String,
    pub account_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id_to: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyPlanned {
    pub to_step_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: Id, budget_id: Id) -> Account {
        Account {
            id,
            budget_id,
            name: format!("acc{}", id),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn test_operation_accepts_string_and_number_amounts() {
        let from_str: Operation = serde_json::from_str(
            r#"{"id":1,"step_id":2,"kind":"actual","sign":"income","amount":"100.00","currency":"EUR","account_id":3,"category_id":4}"#,
        )
        .unwrap();
        assert_eq!(from_str.amount.to_string(), "100.00");
        assert_eq!(from_str.account_id_to, None);

        let from_num: Operation = serde_json::from_str(
            r#"{"id":1,"step_id":2,"kind":"planned","sign":"transfer","amount":12.5,"currency":"EUR","account_id":3,"account_id_to":5}"#,
        )
        .unwrap();
        assert_eq!(from_num.amount, Decimal::new(125, 1));
        assert_eq!(from_num.sign, Sign::Transfer);
    }

    #[test]
    fn test_summary_defaults_missing_fields() {
        let summary: Summary = serde_json::from_str(r#"{"total_income":"5"}"#).unwrap();
        assert_eq!(summary.total_income, Decimal::new(5, 0));
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.net, Decimal::ZERO);
    }

    #[test]
    fn test_new_operation_omits_absent_fields() {
        let op = NewOperation {
            step_id: 1,
            kind: OperationKind::Actual,
            sign: Sign::Income,
            amount: "1.00".to_string(),
            currency: "EUR".to_string(),
            account_id: 2,
            account_id_to: None,
            category_id: Some(3),
            comment: None,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["sign"], "income");
        assert_eq!(json["category_id"], 3);
        assert!(json.get("account_id_to").is_none());
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_scoped_to_filters_and_keeps_order() {
        let items = vec![account(3, 1), account(1, 2), account(2, 1)];
        let scoped = scoped_to(items.clone(), Some(1));
        assert_eq!(scoped.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 2]);
        assert!(scoped_to(items, None).is_empty());
    }

    #[test]
    fn test_sign_parse() {
        assert_eq!("transfer".parse::<Sign>().unwrap(), Sign::Transfer);
        assert!("refund".parse::<Sign>().is_err());
        assert_eq!("actual".parse::<OperationKind>().unwrap(), OperationKind::Actual);
    }
}
