//! Immutable record store and the specialty catalog derived from it.

use crate::model::Doctor;
use foldhash::HashSet;

/// Holds the raw record set, loaded once per session and never mutated after.
#[derive(Debug, Default)]
pub struct RecordStore {
    doctors: Vec<Doctor>,
}

impl RecordStore {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    /// All known specialty labels, deduplicated, in first-seen order.
    pub fn specialty_catalog(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::default();
        let mut catalog = Vec::new();
        for doctor in &self.doctors {
            for label in &doctor.specialties {
                if seen.insert(label.as_str()) {
                    catalog.push(label.clone());
                }
            }
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> RecordStore {
        let doctors: Vec<Doctor> = serde_json::from_value(json!([
            {"name": "Ana", "specialties": ["Cardio", "Derm"]},
            {"name": "Ben", "specialties": ["Derm", "Ortho"]},
            {"name": "Cara"}
        ]))
        .expect("doctors");
        RecordStore::new(doctors)
    }

    #[test]
    fn test_catalog_dedupes_in_first_seen_order() {
        assert_eq!(store().specialty_catalog(), vec!["Cardio", "Derm", "Ortho"]);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert!(store.specialty_catalog().is_empty());
    }

    #[test]
    fn test_len_counts_all_records() {
        assert_eq!(store().len(), 3);
    }
}
