//! In-memory budgeting service for handler tests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};

use super::{ApiRequest, Method, RawResponse, Transport};
use crate::error::ClientResult;
use crate::model::{
    Account, Budget, Category, Id, Operation, OperationKind, Sign, Step, Summary,
};

#[derive(Default)]
struct Tables {
    budgets: Vec<Budget>,
    accounts: Vec<Account>,
    categories: Vec<Category>,
    steps: Vec<Step>,
    operations: Vec<Operation>,
}

#[derive(Deserialize)]
struct OperationPayload {
    step_id: Id,
    kind: OperationKind,
    sign: Sign,
    amount: Decimal,
    currency: String,
    account_id: Option<Id>,
    account_id_to: Option<Id>,
    category_id: Option<Id>,
    comment: Option<String>,
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    tables: RefCell<Tables>,
    next_id: Cell<Id>,
    requests: RefCell<Vec<ApiRequest>>,
    fail_next: RefCell<Option<RawResponse>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next request with `response` instead of handling it
    pub fn fail_next(&self, response: RawResponse) {
        *self.fail_next.borrow_mut() = Some(response);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.tables.borrow().operations.clone()
    }

    fn id(&self) -> Id {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn handle(&self, request: &ApiRequest) -> RawResponse {
        let (path, query) = match request.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request.path.as_str(), None),
        };
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let body = request.body.clone().unwrap_or(Value::Null);

        match (request.method, segments.as_slice()) {
            (Method::Get, ["health"]) => ok(json!({"status": "ok"})),
            (Method::Get, ["budgets"]) => ok(json!(self.tables.borrow().budgets)),
            (Method::Post, ["budgets"]) => {
                let budget = Budget {
                    id: self.id(),
                    name: str_field(&body, "name"),
                    currency: str_field(&body, "currency"),
                    owner_user_id: body["owner_user_id"].as_i64().unwrap_or_default(),
                };
                self.tables.borrow_mut().budgets.push(budget.clone());
                ok(json!(budget))
            }
            (Method::Get, ["accounts"]) => ok(json!(self.tables.borrow().accounts)),
            (Method::Post, ["accounts"]) => {
                let budget_id = body["budget_id"].as_i64().unwrap_or_default();
                if !self.budget_exists(budget_id) {
                    return not_found("budget not found");
                }
                let account = Account {
                    id: self.id(),
                    budget_id,
                    name: str_field(&body, "name"),
                    currency: str_field(&body, "currency"),
                };
                self.tables.borrow_mut().accounts.push(account.clone());
                ok(json!(account))
            }
            (Method::Get, ["categories"]) => ok(json!(self.tables.borrow().categories)),
            (Method::Post, ["categories"]) => {
                let budget_id = body["budget_id"].as_i64().unwrap_or_default();
                if !self.budget_exists(budget_id) {
                    return not_found("budget not found");
                }
                let category = Category {
                    id: self.id(),
                    budget_id,
                    name: str_field(&body, "name"),
                };
                self.tables.borrow_mut().categories.push(category.clone());
                ok(json!(category))
            }
            (Method::Get, ["steps"]) => {
                let budget_id = query
                    .and_then(|q| q.strip_prefix("budget_id="))
                    .and_then(|id| id.parse::<Id>().ok());
                let Some(budget_id) = budget_id else {
                    return RawResponse::new(422, r#"{"detail":"budget_id is required"}"#);
                };
                let steps: Vec<Step> = self
                    .tables
                    .borrow()
                    .steps
                    .iter()
                    .filter(|s| s.budget_id == budget_id)
                    .cloned()
                    .collect();
                ok(json!(steps))
            }
            (Method::Post, ["steps"]) => {
                let step: Result<Step, _> = serde_json::from_value(json!({
                    "id": self.id(),
                    "budget_id": body["budget_id"],
                    "name": body["name"],
                    "date_start": body["date_start"],
                    "date_end": body["date_end"],
                    "granularity": body["granularity"],
                }));
                match step {
                    Ok(step) if self.budget_exists(step.budget_id) => {
                        self.tables.borrow_mut().steps.push(step.clone());
                        ok(json!(step))
                    }
                    Ok(_) => not_found("budget not found"),
                    Err(e) => RawResponse::new(422, json!({"detail": e.to_string()}).to_string()),
                }
            }
            (Method::Get, ["steps", id, "summary"]) => match id.parse::<Id>() {
                Ok(id) => ok(json!(self.summary(id))),
                Err(_) => not_found("step not found"),
            },
            (Method::Get, ["steps", id, "feed"]) => match id.parse::<Id>() {
                Ok(id) => {
                    let mut feed: Vec<Operation> = self
                        .tables
                        .borrow()
                        .operations
                        .iter()
                        .filter(|op| op.step_id == id)
                        .cloned()
                        .collect();
                    feed.reverse();
                    ok(json!(feed))
                }
                Err(_) => not_found("step not found"),
            },
            (Method::Post, ["steps", id, "copy_planned"]) => {
                let from = id.parse::<Id>().ok();
                let to = body["to_step_id"].as_i64();
                self.copy_planned(from, to)
            }
            (Method::Post, ["operations"]) => {
                let payload: OperationPayload = match serde_json::from_value(body) {
                    Ok(payload) => payload,
                    Err(e) => {
                        return RawResponse::new(422, json!({"detail": e.to_string()}).to_string())
                    }
                };
                if !self.tables.borrow().steps.iter().any(|s| s.id == payload.step_id) {
                    return not_found("step not found");
                }
                let operation = Operation {
                    id: self.id(),
                    step_id: payload.step_id,
                    kind: payload.kind,
                    sign: payload.sign,
                    amount: payload.amount,
                    currency: payload.currency,
                    account_id: payload.account_id,
                    account_id_to: payload.account_id_to,
                    category_id: payload.category_id,
                    comment: payload.comment,
                    planned_ref_id: None,
                };
                self.tables.borrow_mut().operations.push(operation.clone());
                ok(json!(operation))
            }
            _ => not_found("Not Found"),
        }
    }

    fn budget_exists(&self, id: Id) -> bool {
        self.tables.borrow().budgets.iter().any(|b| b.id == id)
    }

    fn summary(&self, step_id: Id) -> Summary {
        let tables = self.tables.borrow();
        let actual = tables
            .operations
            .iter()
            .filter(|op| op.step_id == step_id && op.kind == OperationKind::Actual);

        let mut summary = Summary::default();
        for op in actual {
            match op.sign {
                Sign::Income => summary.total_income += op.amount,
                Sign::Expense => summary.total_expense += op.amount,
                Sign::Transfer => {}
            }
        }
        summary.net = summary.total_income - summary.total_expense;
        summary
    }

    fn copy_planned(&self, from: Option<Id>, to: Option<Id>) -> RawResponse {
        let mut tables = self.tables.borrow_mut();
        let src = from.and_then(|id| tables.steps.iter().find(|s| s.id == id).cloned());
        let dst = to.and_then(|id| tables.steps.iter().find(|s| s.id == id).cloned());
        let (Some(src), Some(dst)) = (src, dst) else {
            return not_found("step not found");
        };
        if src.budget_id != dst.budget_id {
            return RawResponse::new(400, r#"{"detail":"steps belong to different budgets"}"#);
        }

        let planned: Vec<Operation> = tables
            .operations
            .iter()
            .filter(|op| op.step_id == src.id && op.kind == OperationKind::Planned)
            .cloned()
            .collect();
        for op in &planned {
            let copy = Operation {
                id: self.id(),
                step_id: dst.id,
                ..op.clone()
            };
            tables.operations.push(copy);
        }
        ok(json!({"copied": planned.len()}))
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(response) = self.fail_next.borrow_mut().take() {
            return Ok(response);
        }
        Ok(self.handle(&request))
    }
}

fn ok(value: Value) -> RawResponse {
    RawResponse::new(200, value.to_string())
}

fn not_found(detail: &str) -> RawResponse {
    RawResponse::new(404, json!({ "detail": detail }).to_string())
}

fn str_field(body: &Value, key: &str) -> String {
    body[key].as_str().unwrap_or_default().to_string()
}
