//! UI Components
//!
//! One panel per area of the page. Panels read the snapshot through the
//! core view-models and never format entities themselves.

pub mod budgets;
pub mod catalog;
pub mod header;
pub mod operation;
pub mod status;
pub mod steps;
pub mod summary;

pub use budgets::BudgetPanel;
pub use catalog::CatalogPanel;
pub use header::Header;
pub use operation::OperationPanel;
pub use status::StatusLine;
pub use steps::StepPanel;
pub use summary::SummaryPanel;

use budgetstep::model::Id;
use budgetstep::render::SelectOption;
use leptos::*;

/// Id from a select's value; the empty placeholder is `None`
pub fn parse_id(value: &str) -> Option<Id> {
    value.trim().parse().ok()
}

/// `<option>` elements for a select
pub fn options_view(options: Vec<SelectOption>) -> View {
    options
        .into_iter()
        .map(|o| {
            view! {
                <option value=o.value.to_string() selected=o.selected>{o.label}</option>
            }
        })
        .collect_view()
}

/// `<li>` elements for a plain list, or a placeholder when empty
pub fn lines_view(lines: Vec<String>, empty: &'static str) -> View {
    if lines.is_empty() {
        return view! { <li class="text-gray-500">{empty}</li> }.into_view();
    }
    lines
        .into_iter()
        .map(|line| view! { <li>{line}</li> })
        .collect_view()
}

pub(crate) const INPUT_CLASS: &str =
    "bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600 focus:border-primary-500 focus:outline-none";
pub(crate) const BUTTON_CLASS: &str =
    "px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg text-sm font-medium transition-colors";
pub(crate) const CARD_CLASS: &str = "bg-gray-800 rounded-xl p-4 space-y-3";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("abc"), None);
    }
}
