//! Local-storage selection store.

use budgetstep::state::Selection;
use budgetstep::store::{SelectionStore, StoreError};

/// Local storage key of the saved selection
pub const SELECTION_KEY: &str = "budgetstep_selection";

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
    window
        .local_storage()
        .map_err(|_| StoreError::Unavailable("local storage blocked".to_string()))?
        .ok_or_else(|| StoreError::Unavailable("local storage missing".to_string()))
}

fn decode(raw: Option<String>) -> Result<Selection, StoreError> {
    match raw {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Ok(Selection::default()),
    }
}

impl SelectionStore for LocalStorageStore {
    fn load(&self) -> Result<Selection, StoreError> {
        let raw = local_storage()?
            .get_item(SELECTION_KEY)
            .map_err(|_| StoreError::Unavailable("read failed".to_string()))?;
        decode(raw)
    }

    fn save(&self, selection: &Selection) -> Result<(), StoreError> {
        let text = serde_json::to_string(selection)?;
        local_storage()?
            .set_item(SELECTION_KEY, &text)
            .map_err(|_| StoreError::Unavailable("write failed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode(None).unwrap(), Selection::default());

        let selection = decode(Some(r#"{"budget_id":4,"step_id":null}"#.to_string())).unwrap();
        assert_eq!(selection.budget_id, Some(4));
        assert_eq!(selection.step_id, None);

        assert!(matches!(decode(Some("{".to_string())), Err(StoreError::Serialization(_))));
    }
}
