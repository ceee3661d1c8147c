//! Pure filter predicates over the loaded record set.
//!
//! Three independent predicates, AND-combined. The filter is stable: records
//! that survive keep their relative input order.

use crate::model::{ConsultMode, Doctor};
use crate::query::QueryState;

/// Indices of the records matching every active predicate, in input order.
pub fn matching_indices(doctors: &[Doctor], query: &QueryState) -> Vec<usize> {
    doctors
        .iter()
        .enumerate()
        .filter(|(_, doctor)| matches(doctor, query))
        .map(|(idx, _)| idx)
        .collect()
}

/// A record must satisfy every active predicate.
pub fn matches(doctor: &Doctor, query: &QueryState) -> bool {
    matches_search(doctor, &query.search)
        && matches_mode(doctor, query.mode)
        && matches_specialties(doctor, &query.specialties)
}

/// Case-insensitive substring match on the record name. Inactive when the
/// term is empty.
fn matches_search(doctor: &Doctor, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    doctor.name.to_lowercase().contains(&term.to_lowercase())
}

/// Exact mode match. Inactive when no mode is requested; a record with no
/// mode fails an active mode filter.
fn matches_mode(doctor: &Doctor, wanted: Option<ConsultMode>) -> bool {
    match wanted {
        None => true,
        Some(mode) => doctor.mode == Some(mode),
    }
}

/// Subset semantics: every requested label must be present on the record.
/// Inactive when nothing is requested; a record with no specialties fails
/// any active specialty filter.
fn matches_specialties(doctor: &Doctor, wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|label| doctor.specialties.iter().any(|s| s == label))
}
