//! Stable ordering of the filtered view.
//!
//! Operates on an index vector into the record store; the backing records
//! are never reordered or mutated.

use crate::model::Doctor;
use crate::query::{QueryState, SortKey, SortOrder};
use std::cmp::Ordering;

/// Sorts `indices` by the given key. No key means identity: whatever order
/// the filter produced is kept. The sort is stable and the direction only
/// flips comparator polarity, so ties keep their pre-sort relative order in
/// both directions.
pub fn sort_indices(
    doctors: &[Doctor],
    indices: &mut [usize],
    key: Option<SortKey>,
    order: SortOrder,
) {
    let Some(key) = key else {
        return;
    };
    indices.sort_by(|&a, &b| {
        let ordering = compare(&doctors[a], &doctors[b], key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Filter then sort: the full derivation pipeline from records and query to
/// the rendered view, recomputed from scratch on every call.
pub fn derive_view(doctors: &[Doctor], query: &QueryState) -> Vec<usize> {
    let mut indices = crate::filter::matching_indices(doctors, query);
    sort_indices(doctors, &mut indices, query.sort, query.sort_order);
    indices
}

fn compare(a: &Doctor, b: &Doctor, key: SortKey) -> Ordering {
    match key {
        SortKey::Fees => a.fees.partial_cmp(&b.fees).unwrap_or(Ordering::Equal),
        SortKey::Experience => a.experience_years.cmp(&b.experience_years),
    }
}
