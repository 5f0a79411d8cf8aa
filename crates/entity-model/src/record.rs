//! Reference records.

use entity_normalization::Normalizer;
use serde::{Deserialize, Serialize};

/// A reference row before normalization.
///
/// Loaders produce these; [`CompanyRecord::new`] turns them into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCompany {
    /// Display name as found in the source.
    pub name: String,
    /// Country code as found in the source.
    pub country: String,
    /// Legal entity identifier, if the source carries one.
    #[serde(default)]
    pub lei: Option<String>,
    /// Provenance tag (registry or file the row came from).
    #[serde(default)]
    pub source: Option<String>,
}

impl RawCompany {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            lei: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_lei(mut self, lei: impl Into<String>) -> Self {
        self.lei = Some(lei.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// An immutable company reference record.
///
/// `name_norm` is computed from `name` at construction and cannot be set
/// independently, so the two never diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    name: String,
    name_norm: String,
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lei: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CompanyRecord {
    /// Build a record, deriving `name_norm` with `normalizer`.
    ///
    /// The country code is trimmed and upper-cased; blank identifiers and
    /// source tags are treated as absent.
    pub fn new(raw: RawCompany, normalizer: &Normalizer) -> Self {
        let name = raw.name.trim().to_string();
        let name_norm = normalizer.normalize(&name);
        Self {
            name,
            name_norm,
            country: normalize_country(&raw.country),
            lei: non_blank(raw.lei),
            source: non_blank(raw.source),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_norm(&self) -> &str {
        &self.name_norm
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn lei(&self) -> Option<&str> {
        self.lei.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn has_lei(&self) -> bool {
        self.lei.is_some()
    }

    /// Case-insensitive country comparison.
    pub fn in_country(&self, code: &str) -> bool {
        self.country.eq_ignore_ascii_case(code.trim())
    }
}

/// Canonical form of a country code: trimmed and upper-cased.
pub fn normalize_country(code: &str) -> String {
    code.trim().to_uppercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: RawCompany) -> CompanyRecord {
        CompanyRecord::new(raw, &Normalizer::default())
    }

    #[test]
    fn test_name_norm_is_derived() {
        let rec = record(RawCompany::new("Apple Inc.", "us"));
        assert_eq!(rec.name(), "Apple Inc.");
        assert_eq!(rec.name_norm(), "apple");
        assert_eq!(rec.country(), "US");
        assert!(rec.in_country("us"));
        assert!(!rec.in_country("GB"));
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let rec = record(
            RawCompany::new("BHP Group Ltd", " au ")
                .with_lei("  ")
                .with_source(""),
        );
        assert_eq!(rec.country(), "AU");
        assert_eq!(rec.lei(), None);
        assert_eq!(rec.source(), None);
        assert!(!rec.has_lei());
    }

    #[test]
    fn test_serializes_without_absent_fields() {
        let rec = record(RawCompany::new("Tesla, Inc.", "US").with_source("sample"));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["name"], "Tesla, Inc.");
        assert_eq!(json["name_norm"], "tesla");
        assert_eq!(json["source"], "sample");
        assert!(json.get("lei").is_none());
    }

    #[test]
    fn test_raw_company_deserializes_with_defaults() {
        let raw: RawCompany =
            serde_json::from_str(r#"{"name": "Rio Tinto plc", "country": "GB"}"#).unwrap();
        assert_eq!(raw, RawCompany::new("Rio Tinto plc", "GB"));
    }
}
