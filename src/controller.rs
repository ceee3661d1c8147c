//! Reconciles UI events into param-store updates.
//!
//! Every handler performs exactly one additive merge (Clear All being the
//! one wholesale reset) and nothing else. The view never changes here: it
//! changes when the event loop notices the store version moved and re-runs
//! the filter/sort pipeline.

use crate::model::ConsultMode;
use crate::query::{self, MemoryParams, ParamStore, QueryState, SortKey};
use std::collections::BTreeMap;

/// Routes user interactions into the param store and maintains the selected
/// specialty cache. The cache is a read model of `QueryState.specialties`,
/// kept to preserve the user's toggle order; after any completed update the
/// two are equal.
pub struct SelectionController<S: ParamStore = MemoryParams> {
    store: S,
    selected_specialties: Vec<String>,
}

impl SelectionController<MemoryParams> {
    pub fn new() -> Self {
        Self::with_store(MemoryParams::default())
    }
}

impl Default for SelectionController<MemoryParams> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ParamStore> SelectionController<S> {
    /// Seeds the selection cache from whatever the store already holds, so a
    /// restored or shared view starts consistent.
    pub fn with_store(store: S) -> Self {
        let selected_specialties = QueryState::parse(&store.snapshot()).specialties;
        Self {
            store,
            selected_specialties,
        }
    }

    /// Typed parse of the current store contents.
    pub fn query(&self) -> QueryState {
        QueryState::parse(&self.store.snapshot())
    }

    pub fn params_snapshot(&self) -> BTreeMap<String, String> {
        self.store.snapshot()
    }

    pub fn store_version(&self) -> u64 {
        self.store.version()
    }

    pub fn selected_specialties(&self) -> &[String] {
        &self.selected_specialties
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected_specialties.iter().any(|s| s == label)
    }

    pub fn on_search_change(&mut self, text: &str) {
        self.store
            .merge(&[(query::KEY_SEARCH, text.to_string())]);
    }

    pub fn on_toggle_specialty(&mut self, label: &str) {
        if let Some(pos) = self.selected_specialties.iter().position(|s| s == label) {
            self.selected_specialties.remove(pos);
        } else {
            self.selected_specialties.push(label.to_string());
        }
        self.store.merge(&[(
            query::KEY_SPECIALTIES,
            self.selected_specialties.join(","),
        )]);
    }

    pub fn on_mode_change(&mut self, mode: Option<ConsultMode>) {
        let value = mode.map(ConsultMode::as_str).unwrap_or("").to_string();
        self.store.merge(&[(query::KEY_MODE, value)]);
    }

    /// Updates the sort key only; the direction is its own control and is
    /// left untouched.
    pub fn on_sort_change(&mut self, key: Option<SortKey>) {
        let value = key.map(SortKey::as_str).unwrap_or("").to_string();
        self.store.merge(&[(query::KEY_SORT, value)]);
    }

    /// The one wholesale reset: store and derived caches back to empty.
    pub fn on_clear_all(&mut self) {
        self.selected_specialties.clear();
        self.store.replace(BTreeMap::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Doctor;
    use crate::query::{SortOrder, decode_query_line};
    use crate::sort::derive_view;
    use serde_json::json;

    fn doctors() -> Vec<Doctor> {
        serde_json::from_value(json!([
            {"name": "Ana", "fees": 500, "experience": 3, "mode": "video",
             "specialties": ["Cardio"]},
            {"name": "Ben", "fees": 300, "experience": 10, "mode": "in-clinic",
             "specialties": ["Cardio", "Derm"]}
        ]))
        .expect("doctors")
    }

    #[test]
    fn test_handlers_write_their_own_key_only() {
        let mut controller = SelectionController::new();
        controller.on_search_change("an");
        controller.on_mode_change(Some(ConsultMode::Video));
        controller.on_sort_change(Some(SortKey::Fees));
        controller.on_toggle_specialty("Cardio");

        let query = controller.query();
        assert_eq!(query.search, "an");
        assert_eq!(query.mode, Some(ConsultMode::Video));
        assert_eq!(query.sort, Some(SortKey::Fees));
        assert_eq!(query.specialties, vec!["Cardio"]);
        // Direction was never written, so the parsed default applies.
        assert_eq!(query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_toggle_specialty_round_trip() {
        let mut controller = SelectionController::new();
        controller.on_toggle_specialty("Cardio");
        controller.on_toggle_specialty("Derm");
        assert_eq!(controller.selected_specialties(), ["Cardio", "Derm"]);

        controller.on_toggle_specialty("Cardio");
        assert_eq!(controller.selected_specialties(), ["Derm"]);

        controller.on_toggle_specialty("Derm");
        assert!(controller.selected_specialties().is_empty());
        assert!(controller.query().specialties.is_empty());
    }

    #[test]
    fn test_selection_cache_always_mirrors_query() {
        let mut controller = SelectionController::new();
        for label in ["Cardio", "Derm", "Cardio", "Ortho"] {
            controller.on_toggle_specialty(label);
            assert_eq!(
                controller.selected_specialties(),
                controller.query().specialties.as_slice()
            );
        }
    }

    #[test]
    fn test_cache_seeded_from_restored_store() {
        let controller = SelectionController::with_store(MemoryParams::with_params(
            decode_query_line("specialties=Cardio%2CDerm&search=an"),
        ));
        assert_eq!(controller.selected_specialties(), ["Cardio", "Derm"]);
        assert!(controller.is_selected("Derm"));
        assert!(!controller.is_selected("Ortho"));
    }

    #[test]
    fn test_sort_change_leaves_direction_alone() {
        let mut controller = SelectionController::with_store(MemoryParams::with_params(
            decode_query_line("sortOrder=desc"),
        ));
        controller.on_sort_change(Some(SortKey::Experience));
        let query = controller.query();
        assert_eq!(query.sort, Some(SortKey::Experience));
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_clear_all_after_update_sequence() {
        let docs = doctors();
        let mut controller = SelectionController::new();
        controller.on_search_change("an");
        controller.on_toggle_specialty("Cardio");
        controller.on_mode_change(Some(ConsultMode::Video));
        controller.on_sort_change(Some(SortKey::Fees));

        controller.on_clear_all();

        let query = controller.query();
        assert!(query.is_empty());
        assert!(controller.selected_specialties().is_empty());
        assert!(controller.params_snapshot().is_empty());
        // The derived view equals the unfiltered, unsorted input order.
        assert_eq!(derive_view(&docs, &query), vec![0, 1]);
    }

    #[test]
    fn test_version_moves_once_per_handler_call() {
        let mut controller = SelectionController::new();
        let v0 = controller.store_version();
        controller.on_search_change("a");
        let v1 = controller.store_version();
        controller.on_clear_all();
        let v2 = controller.store_version();
        assert_eq!(v1, v0 + 1);
        assert_eq!(v2, v1 + 1);
    }

    #[test]
    fn test_search_scenario_through_pipeline() {
        let docs = doctors();
        let mut controller = SelectionController::new();
        controller.on_search_change("an");
        let view = derive_view(&docs, &controller.query());
        let names: Vec<&str> = view.iter().map(|&i| docs[i].name.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);
    }
}
