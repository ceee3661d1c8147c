//! Shared data model types for the doctor listing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Consultation mode offered by a doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultMode {
    Video,
    InClinic,
}

impl ConsultMode {
    /// Parses the wire form. Anything unrecognized is `None`, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "video" => Some(ConsultMode::Video),
            "in-clinic" => Some(ConsultMode::InClinic),
            _ => None,
        }
    }

    /// The wire form, as used both by the listing payload and the param store.
    pub fn as_str(self) -> &'static str {
        match self {
            ConsultMode::Video => "video",
            ConsultMode::InClinic => "in-clinic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsultMode::Video => "Video Consultation",
            ConsultMode::InClinic => "In-clinic Consultation",
        }
    }
}

/// Clinic location, flattened from the nested `clinic.address` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clinic {
    pub locality: String,
    pub city: String,
}

/// One provider entry from the listing payload.
///
/// Immutable once loaded; optional fields default to empty rather than
/// failing deserialization.
#[derive(Debug, Clone)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub photo: String,
    pub experience_years: u32,
    pub fees: f64,
    pub mode: Option<ConsultMode>,
    pub specialties: Vec<String>,
    pub clinic: Option<Clinic>,
}

impl<'de> Deserialize<'de> for Doctor {
    /// Custom deserializer that folds the inconsistent upstream shapes into a
    /// flat domain model:
    ///
    /// - the category list arrives either as `specialties` (strings) or as
    ///   `specialities` (objects with a `name` field); both feed the single
    ///   canonical `specialties` field,
    /// - `experience` may be a number or a string like
    ///   `"13 Years of experience"`,
    /// - `fees` may be a number or a string like `"₹ 500"`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Proxy {
            #[serde(default)]
            id: Option<Value>,
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            photo: Option<String>,
            #[serde(default)]
            experience: Option<Value>,
            #[serde(default)]
            fees: Option<Value>,
            #[serde(default)]
            mode: Option<String>,
            #[serde(default)]
            specialties: Option<Value>,
            #[serde(default)]
            specialities: Option<Value>,
            #[serde(default)]
            clinic: Option<Value>,
        }

        let proxy = Proxy::deserialize(deserializer)?;

        let id = match proxy.id {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        let mut specialties = specialty_names(proxy.specialties.as_ref());
        if specialties.is_empty() {
            specialties = specialty_names(proxy.specialities.as_ref());
        }

        Ok(Doctor {
            id,
            name: proxy.name.unwrap_or_default(),
            photo: proxy.photo.unwrap_or_default(),
            experience_years: proxy.experience.as_ref().map_or(0, experience_years),
            fees: proxy.fees.as_ref().map_or(0.0, fee_amount),
            mode: proxy.mode.as_deref().and_then(ConsultMode::parse),
            specialties,
            clinic: proxy.clinic.as_ref().and_then(clinic_from_value),
        })
    }
}

/// Extracts category labels from either wire shape (strings or `{name}` objects).
fn specialty_names(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("name")
                .and_then(|n| n.as_str())
                .map(|n| n.to_string()),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .collect()
}

fn experience_years(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0) as u32,
        Value::String(s) => leading_digits(s).and_then(|d| d.parse().ok()).unwrap_or(0),
        _ => 0,
    }
}

fn fee_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0).max(0.0),
        Value::String(s) => leading_number(s).unwrap_or(0.0).max(0.0),
        _ => 0.0,
    }
}

/// First run of ASCII digits in the string, if any.
fn leading_digits(s: &str) -> Option<&str> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// First numeric run in the string, with an optional fractional part.
fn leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let rest = &s[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Accepts both `{address: {locality, city}}` and a flat `{locality, city}`.
fn clinic_from_value(value: &Value) -> Option<Clinic> {
    let obj = value.as_object()?;
    let address = obj
        .get("address")
        .and_then(|a| a.as_object())
        .unwrap_or(obj);
    let locality = address
        .get("locality")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    let city = address
        .get("city")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();
    if locality.is_empty() && city.is_empty() {
        None
    } else {
        Some(Clinic { locality, city })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doctor_from(value: Value) -> Doctor {
        serde_json::from_value(value).expect("doctor should deserialize")
    }

    #[test]
    fn test_parse_flat_record() {
        let doc = doctor_from(json!({
            "id": "d1",
            "name": "Ana",
            "photo": "https://example.com/ana.png",
            "experience": 3,
            "fees": 500,
            "mode": "video",
            "specialties": ["Cardio"],
            "clinic": {"address": {"locality": "Koramangala", "city": "Bangalore"}}
        }));

        assert_eq!(doc.name, "Ana");
        assert_eq!(doc.experience_years, 3);
        assert_eq!(doc.fees, 500.0);
        assert_eq!(doc.mode, Some(ConsultMode::Video));
        assert_eq!(doc.specialties, vec!["Cardio".to_string()]);
        let clinic = doc.clinic.expect("clinic");
        assert_eq!(clinic.locality, "Koramangala");
        assert_eq!(clinic.city, "Bangalore");
    }

    #[test]
    fn test_parse_stringly_typed_payload() {
        // The shape the real API actually serves.
        let doc = doctor_from(json!({
            "id": 42,
            "name": "Ben",
            "experience": "13 Years of experience",
            "fees": "₹ 500",
            "mode": "in-clinic",
            "specialities": [{"name": "Dermatologist"}, {"name": "Cosmetologist"}]
        }));

        assert_eq!(doc.id, "42");
        assert_eq!(doc.experience_years, 13);
        assert_eq!(doc.fees, 500.0);
        assert_eq!(doc.mode, Some(ConsultMode::InClinic));
        assert_eq!(
            doc.specialties,
            vec!["Dermatologist".to_string(), "Cosmetologist".to_string()]
        );
        assert!(doc.clinic.is_none());
    }

    #[test]
    fn test_specialties_key_wins_over_specialities() {
        let doc = doctor_from(json!({
            "name": "Cara",
            "specialties": ["Cardio"],
            "specialities": [{"name": "Derm"}]
        }));
        assert_eq!(doc.specialties, vec!["Cardio".to_string()]);
    }

    #[test]
    fn test_missing_optional_fields_degrade_to_empty() {
        let doc = doctor_from(json!({"name": "Dev"}));
        assert_eq!(doc.name, "Dev");
        assert_eq!(doc.experience_years, 0);
        assert_eq!(doc.fees, 0.0);
        assert!(doc.mode.is_none());
        assert!(doc.specialties.is_empty());
        assert!(doc.clinic.is_none());
    }

    #[test]
    fn test_unknown_mode_is_none() {
        let doc = doctor_from(json!({"name": "Eve", "mode": "telepathy"}));
        assert!(doc.mode.is_none());
    }

    #[test]
    fn test_consult_mode_round_trip() {
        for mode in [ConsultMode::Video, ConsultMode::InClinic] {
            assert_eq!(ConsultMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(ConsultMode::parse(""), None);
        assert_eq!(ConsultMode::parse("VIDEO"), None);
    }

    #[test]
    fn test_fee_decimal_string() {
        let doc = doctor_from(json!({"name": "Fay", "fees": "Rs. 449.50 onwards"}));
        assert_eq!(doc.fees, 449.5);
    }
}
