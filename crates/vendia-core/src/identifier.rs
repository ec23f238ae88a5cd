//! Store identifier value types and format classification.
//!
//! Callers address a store either by its canonical tenant UUID or by the
//! external commerce platform's `store_`-prefixed identifier. The two
//! grammars are mutually exclusive (UUIDs carry hyphens at fixed positions
//! and never a `store_` prefix), so classification is unambiguous. The
//! classifier runs exactly once per request; everything downstream works on
//! the typed [`StoreIdentifier`] and never re-validates raw strings.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Standard 8-4-4-4-12 UUID grouping, case-insensitive hex.
static CANONICAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("canonical id regex is valid")
});

/// External commerce platform store id: `store_` plus a non-empty
/// alphanumeric suffix.
static EXTERNAL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^store_[A-Za-z0-9]+$").expect("external id regex is valid"));

/// A validated external-platform store identifier.
///
/// Construction goes through [`ExternalStoreId::parse`]; a value of this type
/// always satisfies the external grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalStoreId(String);

impl ExternalStoreId {
    /// Validate `raw` against the external grammar.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if EXTERNAL_ID_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AppError::InvalidInput(format!(
                "'{}' is not a valid external store id (expected store_<alphanumeric>)",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ExternalStoreId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A classified store identifier: either the platform's canonical tenant UUID
/// or a validated external store id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreIdentifier {
    Canonical(Uuid),
    External(ExternalStoreId),
}

impl StoreIdentifier {
    /// Classify a caller-supplied identifier string.
    ///
    /// Total over all inputs: every string is exactly one of canonical,
    /// external, or invalid. Invalid input is a terminal condition reported
    /// as [`AppError::BadRequest`] naming both accepted grammars; it is never
    /// coerced. Performs no I/O.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if CANONICAL_ID_RE.is_match(raw) {
            // The regex guarantees the standard grouping; Uuid::parse_str
            // cannot fail past it.
            let id = Uuid::parse_str(raw)?;
            return Ok(StoreIdentifier::Canonical(id));
        }
        if EXTERNAL_ID_RE.is_match(raw) {
            return Ok(StoreIdentifier::External(ExternalStoreId(
                raw.to_string(),
            )));
        }
        Err(AppError::BadRequest(format!(
            "'{}' is not a valid store identifier: expected a UUID \
             (8-4-4-4-12 hex) or an external id (store_<alphanumeric>)",
            raw
        )))
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, StoreIdentifier::Canonical(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, StoreIdentifier::External(_))
    }
}

impl Display for StoreIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreIdentifier::Canonical(id) => write!(f, "{}", id),
            StoreIdentifier::External(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_uuid_classifies_as_canonical() {
        let parsed = StoreIdentifier::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
        assert!(parsed.is_canonical());
        assert!(!parsed.is_external());
    }

    #[test]
    fn canonical_uuid_is_case_insensitive() {
        let lower = StoreIdentifier::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
        let upper = StoreIdentifier::parse("123E4567-E89B-12D3-A456-426614174000").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn external_id_classifies_as_external() {
        let parsed = StoreIdentifier::parse("store_01HQWE1234567890").unwrap();
        assert!(parsed.is_external());
        match parsed {
            StoreIdentifier::External(ext) => {
                assert_eq!(ext.as_str(), "store_01HQWE1234567890")
            }
            StoreIdentifier::Canonical(_) => panic!("classified as canonical"),
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        for raw in ["not-an-id", "", "store_", "ffffffff", "store_abc-def"] {
            let err = StoreIdentifier::parse(raw).unwrap_err();
            assert_eq!(err.error_type(), "BadRequest", "input: {:?}", raw);
        }
    }

    #[test]
    fn unhyphenated_uuid_is_not_canonical() {
        // Uuid::parse_str would accept this form, but the wire grammar
        // requires the standard grouping.
        assert!(StoreIdentifier::parse("123e4567e89b12d3a456426614174000").is_err());
    }

    #[test]
    fn external_id_newtype_validates() {
        assert!(ExternalStoreId::parse("store_ABC123").is_ok());
        assert!(ExternalStoreId::parse("store_").is_err());
        assert!(ExternalStoreId::parse("shop_ABC123").is_err());
        assert!(ExternalStoreId::parse("store_abc def").is_err());
    }

    #[test]
    fn external_id_display_round_trips() {
        let id = ExternalStoreId::parse("store_ABC123").unwrap();
        assert_eq!(id.to_string(), "store_ABC123");
        assert_eq!(id.into_inner(), "store_ABC123");
    }
}
