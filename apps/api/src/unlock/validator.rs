//! Payment reference (UTR) check for the colour unlock page.
//!
//! This is a client-side format gate and nothing more. A reference that
//! passes has NOT been confirmed against any payment processor, and no
//! response built from it may claim otherwise.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub const REFERENCE_LENGTH: usize = 12;

/// Values people type to get past the dialog without paying.
const PLACEHOLDER_REFERENCES: &[&str] = &["123456789012", "000000000000"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRejection {
    #[error("The reference must be exactly 12 digits")]
    MalformedFormat,
    #[error("That looks like a placeholder. Enter the reference from your payment app")]
    PlaceholderValue,
}

impl ReferenceRejection {
    pub fn code(&self) -> &'static str {
        match self {
            ReferenceRejection::MalformedFormat => "MALFORMED_FORMAT",
            ReferenceRejection::PlaceholderValue => "PLACEHOLDER_VALUE",
        }
    }
}

/// A reference that passed the format check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaymentReference(String);

impl PaymentReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts exactly 12 ASCII digits that are not a known placeholder.
/// Input is not trimmed.
pub fn validate(reference: &str) -> Result<PaymentReference, ReferenceRejection> {
    let well_formed = reference.len() == REFERENCE_LENGTH
        && reference.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(ReferenceRejection::MalformedFormat);
    }
    if PLACEHOLDER_REFERENCES.contains(&reference) {
        return Err(ReferenceRejection::PlaceholderValue);
    }
    Ok(PaymentReference(reference.to_string()))
}

/// How strongly a verifier vouches for a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    FormatOnly,
}

/// Pluggable reference check. `AppState` holds an `Arc<dyn ReferenceVerifier>`.
#[async_trait]
pub trait ReferenceVerifier: Send + Sync {
    async fn verify(&self, reference: &str) -> Result<PaymentReference, ReferenceRejection>;

    fn level(&self) -> VerificationLevel;
}

/// The only verifier: runs [`validate`] and nothing else.
pub struct FormatOnlyVerifier;

#[async_trait]
impl ReferenceVerifier for FormatOnlyVerifier {
    async fn verify(&self, reference: &str) -> Result<PaymentReference, ReferenceRejection> {
        validate(reference)
    }

    fn level(&self) -> VerificationLevel {
        VerificationLevel::FormatOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_twelve_digits() {
        let reference = validate("987654321098").unwrap();
        assert_eq!(reference.as_str(), "987654321098");
    }

    #[test]
    fn test_rejects_sequential_placeholder() {
        assert_eq!(
            validate("123456789012"),
            Err(ReferenceRejection::PlaceholderValue)
        );
    }

    #[test]
    fn test_rejects_zero_placeholder() {
        assert_eq!(
            validate("000000000000"),
            Err(ReferenceRejection::PlaceholderValue)
        );
    }

    #[test]
    fn test_rejects_short_reference() {
        assert_eq!(validate("12345"), Err(ReferenceRejection::MalformedFormat));
    }

    #[test]
    fn test_rejects_non_digit() {
        assert_eq!(
            validate("12a456789012"),
            Err(ReferenceRejection::MalformedFormat)
        );
    }

    #[test]
    fn test_rejects_long_reference() {
        assert_eq!(
            validate("9876543210981"),
            Err(ReferenceRejection::MalformedFormat)
        );
    }

    #[test]
    fn test_rejects_empty_and_padded() {
        assert_eq!(validate(""), Err(ReferenceRejection::MalformedFormat));
        assert_eq!(
            validate(" 98765432109"),
            Err(ReferenceRejection::MalformedFormat)
        );
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert_eq!(
            validate("٩٨٧٦٥٤٣٢١٠٩٨"),
            Err(ReferenceRejection::MalformedFormat)
        );
    }

    #[test]
    fn test_rejection_codes() {
        assert_eq!(ReferenceRejection::MalformedFormat.code(), "MALFORMED_FORMAT");
        assert_eq!(ReferenceRejection::PlaceholderValue.code(), "PLACEHOLDER_VALUE");
    }

    #[tokio::test]
    async fn test_format_only_verifier_delegates() {
        let verifier = FormatOnlyVerifier;
        assert!(verifier.verify("987654321098").await.is_ok());
        assert_eq!(
            verifier.verify("000000000000").await,
            Err(ReferenceRejection::PlaceholderValue)
        );
        assert_eq!(verifier.level(), VerificationLevel::FormatOnly);
    }
}
