//! Form Logic
//!
//! Raw form input as the user typed it, and the conversion of each form into
//! the request body it submits. Only empty-field and selection checks are
//! done here; everything else is left to the service.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ValidationError;
use crate::model::{
    Granularity, Id, NewAccount, NewBudget, NewCategory, NewOperation, NewStep, OperationKind,
    Sign, DEFAULT_CURRENCY, DEFAULT_OWNER_ID,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetForm {
    pub name: String,
    pub currency: String,
    pub owner_user_id: String,
}

impl BudgetForm {
    pub fn to_request(&self) -> Result<NewBudget, ValidationError> {
        let name = required(&self.name, "budget")?;
        let owner = self.owner_user_id.trim();
        let owner_user_id = if owner.is_empty() {
            DEFAULT_OWNER_ID
        } else {
            owner
                .parse()
                .map_err(|_| ValidationError::InvalidOwner(owner.to_string()))?
        };

        Ok(NewBudget {
            name,
            currency: currency_or_default(&self.currency),
            owner_user_id,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountForm {
    pub name: String,
    pub currency: String,
}

impl AccountForm {
    pub fn to_request(&self, budget_id: Option<Id>) -> Result<NewAccount, ValidationError> {
        let budget_id = budget_id.ok_or(ValidationError::NoBudget)?;
        Ok(NewAccount {
            budget_id,
            name: required(&self.name, "account")?,
            currency: currency_or_default(&self.currency),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn to_request(&self, budget_id: Option<Id>) -> Result<NewCategory, ValidationError> {
        let budget_id = budget_id.ok_or(ValidationError::NoBudget)?;
        Ok(NewCategory {
            budget_id,
            name: required(&self.name, "category")?,
        })
    }
}

/// Step form; blank fields default to the calendar month containing `today`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepForm {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date_start: String,
    /// `YYYY-MM-DD`
    pub date_end: String,
}

impl StepForm {
    pub fn to_request(&self, budget_id: Option<Id>, today: NaiveDate) -> Result<NewStep, ValidationError> {
        let budget_id = budget_id.ok_or(ValidationError::NoBudget)?;
        let (first, last) = month_bounds(today)
            .ok_or_else(|| ValidationError::InvalidDate(today.to_string()))?;

        let name = match self.name.trim() {
            "" => format!("Step {}", today.format("%Y-%m-%d")),
            name => name.to_string(),
        };

        Ok(NewStep {
            budget_id,
            granularity: Granularity::Month,
            name,
            date_start: date_or(&self.date_start, first)?,
            date_end: date_or(&self.date_end, last)?,
        })
    }
}

/// First and last day of the month containing `day`
pub fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = day.with_day(1)?;
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}

/// Which optional operation field is in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Moves money between two accounts; no category
    Transfer,
    /// Income or expense against a category; no destination account
    Categorized,
}

/// Which optional operation fields to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    pub destination_account: bool,
    pub category: bool,
}

impl FormMode {
    pub fn for_sign(sign: Sign) -> Self {
        match sign {
            Sign::Transfer => FormMode::Transfer,
            Sign::Income | Sign::Expense => FormMode::Categorized,
        }
    }

    pub fn visibility(&self) -> FieldVisibility {
        match self {
            FormMode::Transfer => FieldVisibility {
                destination_account: true,
                category: false,
            },
            FormMode::Categorized => FieldVisibility {
                destination_account: false,
                category: true,
            },
        }
    }
}

impl From<Sign> for FormMode {
    fn from(sign: Sign) -> Self {
        FormMode::for_sign(sign)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationForm {
    pub kind: OperationKind,
    pub sign: Sign,
    pub amount: String,
    pub currency: String,
    pub account_id: Option<Id>,
    pub account_id_to: Option<Id>,
    pub category_id: Option<Id>,
    pub comment: String,
}

impl OperationForm {
    pub fn mode(&self) -> FormMode {
        FormMode::for_sign(self.sign)
    }

    /// Build the payload; the form mode decides which optional id is sent
    pub fn to_request(&self, step_id: Option<Id>) -> Result<NewOperation, ValidationError> {
        let step_id = step_id.ok_or(ValidationError::NoStep)?;
        let account_id = self.account_id.ok_or(ValidationError::NoAccount)?;

        let (account_id_to, category_id) = match self.mode() {
            FormMode::Transfer => (
                Some(self.account_id_to.ok_or(ValidationError::NoDestinationAccount)?),
                None,
            ),
            FormMode::Categorized => (None, Some(self.category_id.ok_or(ValidationError::NoCategory)?)),
        };

        let comment = match self.comment.trim() {
            "" => None,
            comment => Some(comment.to_string()),
        };

        Ok(NewOperation {
            step_id,
            kind: self.kind,
            sign: self.sign,
            amount: normalize_amount(&self.amount)?,
            currency: currency_or_default(&self.currency),
            account_id,
            account_id_to,
            category_id,
            comment,
        })
    }
}

/// Coerce user input to a two-decimal string; blank means zero
pub fn normalize_amount(input: &str) -> Result<String, ValidationError> {
    let input = input.trim();
    let value = if input.is_empty() {
        Decimal::ZERO
    } else {
        input
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidAmount(input.to_string()))?
    };

    let mut value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    Ok(value.to_string())
}

fn required(value: &str, what: &'static str) -> Result<String, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::MissingName(what)),
        value => Ok(value.to_string()),
    }
}

fn currency_or_default(value: &str) -> String {
    match value.trim() {
        "" => DEFAULT_CURRENCY.to_string(),
        value => value.to_string(),
    }
}

fn date_or(value: &str, default: NaiveDate) -> Result<NaiveDate, ValidationError> {
    match value.trim() {
        "" => Ok(default),
        value => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(value.to_string())),
    }
}
