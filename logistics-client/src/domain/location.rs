//! Location types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Maximum length of a location code.
const MAX_CODE_LEN: usize = 10;

/// Error returned when parsing an invalid location code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location code: {reason}")]
pub struct InvalidLocationCode {
    reason: &'static str,
}

/// Opaque server-assigned identity of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub i64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A short, unique location code (usually an IATA code such as `ist`).
///
/// Codes typed by a user are 1 to 10 ASCII letters or digits. Case is
/// preserved because the remote data set stores codes in lower case and
/// compares them itself.
///
/// Codes decoded from the remote service only need to be non-blank: the
/// service accepts any code, and one unusual row must not fail a whole page.
///
/// # Examples
///
/// ```
/// use logistics_client::domain::LocationCode;
///
/// let ist = LocationCode::parse("IST").unwrap();
/// assert_eq!(ist.as_str(), "IST");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(LocationCode::parse(" lhr ").unwrap().as_str(), "lhr");
///
/// // Empty and embedded whitespace are rejected
/// assert!(LocationCode::parse("").is_err());
/// assert!(LocationCode::parse("L HR").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationCode(String);

impl LocationCode {
    /// Parse a location code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidLocationCode {
                reason: "must not be empty",
            });
        }

        if trimmed.len() > MAX_CODE_LEN {
            return Err(InvalidLocationCode {
                reason: "must be at most 10 characters",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidLocationCode {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(LocationCode(trimmed.to_string()))
    }

    /// Accept a code stored by the remote service: trimmed, non-blank.
    pub fn from_wire(s: &str) -> Result<Self, InvalidLocationCode> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLocationCode {
                reason: "must not be empty",
            });
        }
        Ok(LocationCode(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LocationCode {
    type Error = InvalidLocationCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LocationCode::from_wire(&value)
    }
}

impl From<LocationCode> for String {
    fn from(code: LocationCode) -> Self {
        code.0
    }
}

impl fmt::Debug for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationCode({})", self.0)
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A location as stored by the remote service.
///
/// Name, country and city are not re-validated on the way in: imported data
/// may carry a blank city. Equality for selection purposes is by `id`, see
/// [`Location::same_entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub country: String,
    pub city: String,
    pub location_code: LocationCode,
}

impl Location {
    /// Display label: `"{name} ({code})"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.location_code)
    }

    /// True if both values refer to the same stored location.
    ///
    /// Two locations may render identical labels; identity is authoritative.
    pub fn same_entity(&self, other: &Location) -> bool {
        self.id == other.id
    }
}

/// An unsaved location, as submitted by a create or update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub country: String,
    pub city: String,
    pub location_code: String,
}

impl LocationDraft {
    /// Check the draft before it is sent.
    ///
    /// All fields are required; the code must parse as a [`LocationCode`].
    /// Returns the draft with trimmed fields on success.
    pub fn validate(&self) -> Result<LocationDraft, DomainError> {
        let name = required("name", &self.name)?;
        let country = required("country", &self.country)?;
        let city = required("city", &self.city)?;
        let code = LocationCode::parse(&self.location_code)
            .map_err(|e| DomainError::Validation(format!("locationCode: {}", e)))?;

        Ok(LocationDraft {
            name,
            country,
            city,
            location_code: code.into(),
        })
    }
}

impl From<&Location> for LocationDraft {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            country: location.country.clone(),
            city: location.city.clone(),
            location_code: location.location_code.to_string(),
        }
    }
}

fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(LocationCode::parse("IST").is_ok());
        assert!(LocationCode::parse("saw").is_ok());
        assert!(LocationCode::parse("CCIST01").is_ok());
    }

    #[test]
    fn parse_preserves_case() {
        assert_eq!(LocationCode::parse("ist").unwrap().as_str(), "ist");
        assert_ne!(
            LocationCode::parse("ist").unwrap(),
            LocationCode::parse("IST").unwrap()
        );
    }

    #[test]
    fn reject_invalid_codes() {
        assert!(LocationCode::parse("").is_err());
        assert!(LocationCode::parse("   ").is_err());
        assert!(LocationCode::parse("IS T").is_err());
        assert!(LocationCode::parse("IS-T").is_err());
        assert!(LocationCode::parse("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn label_format() {
        let loc = fixtures::location(1, "IST");
        assert_eq!(loc.label(), "IST Airport (IST)");
    }

    #[test]
    fn identity_not_label_decides_sameness() {
        let a = fixtures::location(1, "IST");
        let mut b = fixtures::location(2, "IST");
        b.name = a.name.clone();
        assert_eq!(a.label(), b.label());
        assert!(!a.same_entity(&b));
        assert!(a.same_entity(&a.clone()));
    }

    #[test]
    fn deserialize_server_json() {
        let json = r#"{"id":7,"name":"Istanbul Airport","country":"TR","city":"","locationCode":"ist"}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.id, LocationId(7));
        assert_eq!(loc.city, "");
        assert_eq!(loc.location_code.as_str(), "ist");
    }

    #[test]
    fn deserialize_accepts_stored_codes() {
        for code in ["ist-2", "CC IST", "LONGCODE123"] {
            let json = format!(
                r#"{{"id":7,"name":"X","country":"TR","city":"X","locationCode":"{code}"}}"#
            );
            let loc: Location = serde_json::from_str(&json).unwrap();
            assert_eq!(loc.location_code.as_str(), code);
            // Typed input stays strict
            assert!(LocationCode::parse(code).is_err());
        }
    }

    #[test]
    fn deserialize_rejects_blank_code() {
        let json = r#"{"id":7,"name":"X","country":"TR","city":"X","locationCode":"  "}"#;
        assert!(serde_json::from_str::<Location>(json).is_err());
    }

    #[test]
    fn draft_validation() {
        let draft = LocationDraft {
            name: " Taksim ".into(),
            country: "TR".into(),
            city: "Istanbul".into(),
            location_code: "CCIST".into(),
        };
        let clean = draft.validate().unwrap();
        assert_eq!(clean.name, "Taksim");

        let blank_city = LocationDraft {
            city: "  ".into(),
            ..draft.clone()
        };
        assert_eq!(
            blank_city.validate().unwrap_err().to_string(),
            "validation failed: city is required"
        );

        let bad_code = LocationDraft {
            location_code: "CC IST".into(),
            ..draft
        };
        assert!(bad_code.validate().is_err());
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = LocationDraft::from(&fixtures::location(3, "ESB"));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["locationCode"], "ESB");
        assert!(json.get("id").is_none());
    }
}
