//! Typed view over the external key-value param store.
//!
//! The param store plays the role the page query string plays in a browser:
//! a flat string-to-string mapping that outlives any single interaction and
//! makes the current view shareable. This module owns both sides of the
//! contract: parsing raw params into a [`QueryState`] and writing typed
//! updates back without touching unrelated keys.

use crate::model::ConsultMode;
use std::collections::BTreeMap;

pub const KEY_SEARCH: &str = "search";
pub const KEY_MODE: &str = "mode";
pub const KEY_SPECIALTIES: &str = "specialties";
pub const KEY_SORT: &str = "sort";
pub const KEY_SORT_ORDER: &str = "sortOrder";

/// Sort key applied to the filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Fees,
    Experience,
}

impl SortKey {
    /// Unknown values normalize to `None` (no ordering), never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }
}

/// Sort direction. Only meaningful while a sort key is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than the literal "desc" falls back to ascending.
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Typed snapshot of all recognized filter/sort params.
///
/// Always derivable from the raw store; `parse` followed by `to_params`
/// followed by `parse` is a fixed point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    /// Name filter; empty string means no text filter.
    pub search: String,
    /// Mode filter; `None` means no mode filter.
    pub mode: Option<ConsultMode>,
    /// Requested specialty labels; a record must carry every one of them.
    pub specialties: Vec<String>,
    /// `None` means no ordering: the stable filter order is kept as-is.
    pub sort: Option<SortKey>,
    pub sort_order: SortOrder,
}

impl QueryState {
    /// Reads the recognized keys out of a raw snapshot, applying the empty
    /// semantics of each field. Missing and malformed values both normalize
    /// to the field's empty value.
    pub fn parse(params: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(String::as_str).unwrap_or("");
        Self {
            search: get(KEY_SEARCH).to_string(),
            mode: ConsultMode::parse(get(KEY_MODE)),
            specialties: split_specialties(get(KEY_SPECIALTIES)),
            sort: SortKey::parse(get(KEY_SORT)),
            sort_order: SortOrder::parse(get(KEY_SORT_ORDER)),
        }
    }

    /// Full serialization of the recognized keys.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KEY_SEARCH.to_string(), self.search.clone()),
            (
                KEY_MODE.to_string(),
                self.mode.map(ConsultMode::as_str).unwrap_or("").to_string(),
            ),
            (
                KEY_SPECIALTIES.to_string(),
                self.specialties.join(","),
            ),
            (
                KEY_SORT.to_string(),
                self.sort.map(SortKey::as_str).unwrap_or("").to_string(),
            ),
            (KEY_SORT_ORDER.to_string(), self.sort_order.as_str().to_string()),
        ])
    }

    /// True when every field holds its empty value, i.e. the unfiltered,
    /// unsorted view.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.mode.is_none()
            && self.specialties.is_empty()
            && self.sort.is_none()
    }
}

/// Splits the comma-joined wire form, discarding empty tokens so a trailing
/// comma or an all-empty value yields an empty set rather than `[""]`.
fn split_specialties(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Abstract key-value store with change notification.
///
/// `merge` is the only write path interactions are allowed to take: it
/// overwrites exactly the named keys and carries every other key, recognized
/// or not, over unchanged. `replace` exists for the one wholesale operation,
/// Clear All. Change notification is a monotonically increasing version; in
/// the single-threaded event model the loop re-derives the view whenever the
/// version it last observed is stale.
pub trait ParamStore {
    fn snapshot(&self) -> BTreeMap<String, String>;
    fn merge(&mut self, patch: &[(&str, String)]);
    fn replace(&mut self, params: BTreeMap<String, String>);
    fn version(&self) -> u64;
}

/// In-memory param store backing the TUI session.
#[derive(Debug, Default)]
pub struct MemoryParams {
    params: BTreeMap<String, String>,
    version: u64,
}

impl MemoryParams {
    pub fn with_params(params: BTreeMap<String, String>) -> Self {
        Self { params, version: 0 }
    }
}

impl ParamStore for MemoryParams {
    fn snapshot(&self) -> BTreeMap<String, String> {
        self.params.clone()
    }

    fn merge(&mut self, patch: &[(&str, String)]) {
        for (key, value) in patch {
            self.params.insert((*key).to_string(), value.clone());
        }
        self.version += 1;
    }

    fn replace(&mut self, params: BTreeMap<String, String>) {
        self.params = params;
        self.version += 1;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Encodes a param snapshot as a `k=v&k=v` line, percent-escaping keys and
/// values. This is the persisted/shareable form of the view state.
pub fn encode_query_line(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes a `k=v&k=v` line. Segments without `=`, with an empty key, or
/// with invalid escapes are dropped rather than failing the whole line.
pub fn decode_query_line(line: &str) -> BTreeMap<String, String> {
    line.trim()
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            let key = urlencoding::decode(key).ok()?;
            if key.is_empty() {
                return None;
            }
            let value = urlencoding::decode(value).ok()?;
            Some((key.into_owned(), value.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_empty_store_yields_defaults() {
        let state = QueryState::parse(&BTreeMap::new());
        assert_eq!(state, QueryState::default());
        assert!(state.is_empty());
        assert_eq!(state.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_parse_full_state() {
        let state = QueryState::parse(&params(&[
            ("search", "an"),
            ("mode", "video"),
            ("specialties", "Cardio,Derm"),
            ("sort", "fees"),
            ("sortOrder", "desc"),
        ]));
        assert_eq!(state.search, "an");
        assert_eq!(state.mode, Some(ConsultMode::Video));
        assert_eq!(state.specialties, vec!["Cardio", "Derm"]);
        assert_eq!(state.sort, Some(SortKey::Fees));
        assert_eq!(state.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_malformed_values_normalize_to_empty() {
        let state = QueryState::parse(&params(&[
            ("mode", "carrier-pigeon"),
            ("sort", "rating"),
            ("sortOrder", "sideways"),
        ]));
        assert!(state.mode.is_none());
        assert!(state.sort.is_none());
        assert_eq!(state.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_specialties_split_discards_empty_tokens() {
        let state = QueryState::parse(&params(&[("specialties", ",Cardio,,Derm,")]));
        assert_eq!(state.specialties, vec!["Cardio", "Derm"]);

        let state = QueryState::parse(&params(&[("specialties", "")]));
        assert!(state.specialties.is_empty());

        let state = QueryState::parse(&params(&[("specialties", ",,,")]));
        assert!(state.specialties.is_empty());
    }

    #[test]
    fn test_parse_serialize_is_fixed_point() {
        let states = [
            QueryState::default(),
            QueryState {
                search: "an".to_string(),
                mode: Some(ConsultMode::InClinic),
                specialties: vec!["Cardio".to_string(), "General Physician".to_string()],
                sort: Some(SortKey::Experience),
                sort_order: SortOrder::Desc,
            },
        ];
        for state in states {
            assert_eq!(QueryState::parse(&state.to_params()), state);
        }
    }

    #[test]
    fn test_merge_touches_only_named_keys() {
        let mut store = MemoryParams::with_params(params(&[
            ("search", "an"),
            ("specialties", "Cardio"),
            ("utm_source", "newsletter"),
        ]));
        store.merge(&[("mode", "video".to_string())]);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.get("search").map(String::as_str), Some("an"));
        assert_eq!(snapshot.get("specialties").map(String::as_str), Some("Cardio"));
        assert_eq!(snapshot.get("mode").map(String::as_str), Some("video"));
        // Foreign keys survive every merge verbatim.
        assert_eq!(
            snapshot.get("utm_source").map(String::as_str),
            Some("newsletter")
        );
    }

    #[test]
    fn test_merge_pairwise_isolation() {
        // Updating field X never changes the parsed value of any other field.
        let keys: [(&str, &str); 5] = [
            (KEY_SEARCH, "derm"),
            (KEY_MODE, "in-clinic"),
            (KEY_SPECIALTIES, "Ortho"),
            (KEY_SORT, "experience"),
            (KEY_SORT_ORDER, "desc"),
        ];
        for (target, value) in keys {
            let mut store = MemoryParams::with_params(params(&[
                (KEY_SEARCH, "an"),
                (KEY_MODE, "video"),
                (KEY_SPECIALTIES, "Cardio,Derm"),
                (KEY_SORT, "fees"),
                (KEY_SORT_ORDER, "asc"),
            ]));
            let before = QueryState::parse(&store.snapshot());
            store.merge(&[(target, value.to_string())]);
            let after = QueryState::parse(&store.snapshot());

            for (other, _) in keys.iter().filter(|(k, _)| *k != target) {
                match *other {
                    KEY_SEARCH => assert_eq!(before.search, after.search),
                    KEY_MODE => assert_eq!(before.mode, after.mode),
                    KEY_SPECIALTIES => assert_eq!(before.specialties, after.specialties),
                    KEY_SORT => assert_eq!(before.sort, after.sort),
                    _ => assert_eq!(before.sort_order, after.sort_order),
                }
            }
        }
    }

    #[test]
    fn test_replace_resets_everything() {
        let mut store = MemoryParams::with_params(params(&[
            ("search", "an"),
            ("utm_source", "newsletter"),
        ]));
        store.replace(BTreeMap::new());
        assert!(store.snapshot().is_empty());
        assert!(QueryState::parse(&store.snapshot()).is_empty());
    }

    #[test]
    fn test_version_bumps_on_every_write() {
        let mut store = MemoryParams::default();
        let v0 = store.version();
        store.merge(&[("search", "a".to_string())]);
        let v1 = store.version();
        store.replace(BTreeMap::new());
        let v2 = store.version();
        assert!(v0 < v1 && v1 < v2);
    }

    #[test]
    fn test_query_line_round_trip() {
        let original = params(&[
            ("search", "dr amy"),
            ("specialties", "Cardio,General Physician"),
            ("mode", "in-clinic"),
        ]);
        let line = encode_query_line(&original);
        assert!(!line.contains(' '), "spaces must be escaped: {line}");
        assert_eq!(decode_query_line(&line), original);
    }

    #[test]
    fn test_decode_query_line_tolerates_junk() {
        let decoded = decode_query_line("search=an&&novalue&=orphan&mode=video");
        assert_eq!(decoded.get("search").map(String::as_str), Some("an"));
        assert_eq!(decoded.get("mode").map(String::as_str), Some("video"));
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let line = encode_query_line(&params(&[("specialties", "Ear & Throat,Cardio")]));
        assert_eq!(decode_query_line(&line).get("specialties").map(String::as_str),
            Some("Ear & Throat,Cardio"));
    }
}
