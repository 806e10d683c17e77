//! Draft validation run at the create boundary.

use thiserror::Error;

/// Errors produced by validating a draft before its create call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("{entity} draft is missing required fields: {}", fields.join(", "))]
    MissingFields {
        /// Entity kind being validated (e.g. "customer").
        entity: &'static str,
        /// Names of the empty required fields.
        fields: Vec<&'static str>,
    },
}

/// The creatable field set for one entity kind.
///
/// Drafts are the pre-persistence form of a record: no identifier, no
/// creation timestamp. Validation runs once, at the create boundary, before
/// any remote call is made; a draft that fails validation never leaves the
/// process.
///
/// Required-field checks cover free-text fields only. Typed fields (dates,
/// prices) cannot be absent once a draft value exists, so they carry no
/// runtime check.
pub trait DraftRecord {
    /// Entity kind name used in validation errors.
    const ENTITY: &'static str;

    /// Names of required fields that are currently empty.
    ///
    /// Whitespace-only values count as empty, matching how the intake forms
    /// treat them.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] naming each empty field.
    fn validate(&self) -> Result<(), ValidationError> {
        let fields = self.missing_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                entity: Self::ENTITY,
                fields,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Stub(Vec<&'static str>);

    impl DraftRecord for Stub {
        const ENTITY: &'static str = "stub";

        fn missing_fields(&self) -> Vec<&'static str> {
            self.0.clone()
        }
    }

    #[test]
    fn test_validate_complete() {
        assert!(Stub(vec![]).validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let err = Stub(vec!["first_name", "email"]).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields {
                entity: "stub",
                fields: vec!["first_name", "email"],
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::MissingFields {
            entity: "customer",
            fields: vec!["phone", "address"],
        };
        assert_eq!(
            err.to_string(),
            "customer draft is missing required fields: phone, address"
        );
    }
}
