//! Rule engine for territory create and update payloads.
//!
//! Every rule runs independently and all violations are reported together.
//! Violations keep rule order within a field; the external map is keyed by the
//! lower-cased field name so clients can match errors to payload fields
//! regardless of casing.

use std::fmt;

use super::{Demographics, Error, FieldErrors, TERRITORY_NAME_MAX, Territory, is_valid_zip_code};
use crate::domain::ports::{CreateTerritoryRequest, UpdateTerritoryRequest};

/// Read access to the mutable territory fields the rules inspect.
pub trait TerritoryFields {
    /// Display name.
    fn name(&self) -> &str;
    /// Postal codes in order.
    fn zip_codes(&self) -> &[String];
    /// Open-ended attributes.
    fn demographics(&self) -> &Demographics;
}

macro_rules! impl_territory_fields {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TerritoryFields for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn zip_codes(&self) -> &[String] {
                    &self.zip_codes
                }

                fn demographics(&self) -> &Demographics {
                    &self.demographics
                }
            }
        )+
    };
}

impl_territory_fields!(CreateTerritoryRequest, UpdateTerritoryRequest, Territory);

/// Payload field a violation is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TerritoryField {
    /// `name`
    Name,
    /// `zipCodes`
    ZipCodes,
    /// `demographics`
    Demographics,
}

impl TerritoryField {
    /// Property name as declared on the payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::ZipCodes => "ZipCodes",
            Self::Demographics => "Demographics",
        }
    }

    /// Key used in the external error map.
    #[must_use]
    pub fn external_key(self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for TerritoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field the rule inspected.
    pub field: TerritoryField,
    /// Human-readable message.
    pub message: String,
}

impl FieldViolation {
    fn new(field: TerritoryField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Non-empty, ordered collection of rule violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("territory payload failed {} validation rule(s)", .violations.len())]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Violations in the order the rules ran.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Group messages by lower-cased field name.
    ///
    /// # Examples
    /// ```
    /// use territory_backend::domain::ports::CreateTerritoryRequest;
    /// use territory_backend::domain::validate_territory;
    ///
    /// let failure = validate_territory(&CreateTerritoryRequest::default())
    ///     .expect_err("empty payload is rejected");
    /// let errors = failure.field_errors();
    /// assert_eq!(errors["name"], vec!["Name is required".to_owned()]);
    /// assert_eq!(errors["zipcodes"], vec!["At least one zip code is required".to_owned()]);
    /// ```
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for violation in &self.violations {
            errors
                .entry(violation.field.external_key())
                .or_default()
                .push(violation.message.clone());
        }
        errors
    }
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Self::validation_failed(failure.field_errors())
    }
}

/// Decide whether a create or update payload is acceptable.
///
/// # Errors
/// Returns every violated rule when the payload is rejected.
pub fn validate_territory<T>(payload: &T) -> Result<(), ValidationFailure>
where
    T: TerritoryFields + ?Sized,
{
    let mut violations = Vec::new();
    check_name(payload.name(), &mut violations);
    check_zip_codes(payload.zip_codes(), &mut violations);
    check_demographics(payload.demographics(), &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { violations })
    }
}

fn check_name(name: &str, violations: &mut Vec<FieldViolation>) {
    if name.trim().is_empty() {
        violations.push(FieldViolation::new(TerritoryField::Name, "Name is required"));
    }
    if name.chars().count() > TERRITORY_NAME_MAX {
        violations.push(FieldViolation::new(
            TerritoryField::Name,
            format!("Name must be less than {TERRITORY_NAME_MAX} characters"),
        ));
    }
}

fn check_zip_codes(zip_codes: &[String], violations: &mut Vec<FieldViolation>) {
    if zip_codes.is_empty() {
        violations.push(FieldViolation::new(
            TerritoryField::ZipCodes,
            "At least one zip code is required",
        ));
        return;
    }

    for (position, zip_code) in (1_usize..).zip(zip_codes) {
        if !is_valid_zip_code(zip_code) {
            violations.push(FieldViolation::new(
                TerritoryField::ZipCodes,
                format!("element {position} (\"{zip_code}\") is not a valid 5-digit zip code"),
            ));
        }
    }
}

fn check_demographics(demographics: &Demographics, violations: &mut Vec<FieldViolation>) {
    for (key, value) in demographics {
        let rendered = value.to_string();
        if key.is_empty() || rendered.is_empty() {
            violations.push(FieldViolation::new(
                TerritoryField::Demographics,
                format!("\"{key}:{rendered}\" must contain both a name and value {{<name>:<value>}}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn valid_request() -> CreateTerritoryRequest {
        serde_json::from_value(json!({
            "name": "Northwest Region",
            "zipCodes": ["98101", "98102"],
            "demographics": { "population": 2_500_000, "industries": ["Technology"] }
        }))
        .expect("valid request")
    }

    fn messages_for(failure: &ValidationFailure, key: &str) -> Vec<String> {
        failure.field_errors().remove(key).unwrap_or_default()
    }

    #[rstest]
    fn accepts_valid_payload(valid_request: CreateTerritoryRequest) {
        assert!(validate_territory(&valid_request).is_ok());
    }

    #[rstest]
    fn accepts_empty_demographics(mut valid_request: CreateTerritoryRequest) {
        valid_request.demographics = Demographics::new();
        assert!(validate_territory(&valid_request).is_ok());
    }

    #[rstest]
    fn reports_every_field_at_once() {
        let failure = validate_territory(&CreateTerritoryRequest::default())
            .expect_err("empty payload");

        let errors = failure.field_errors();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["name", "zipcodes"]);
        assert_eq!(failure.violations().len(), 2);
    }

    #[rstest]
    #[case("", &["Name is required"])]
    #[case("   ", &["Name is required"])]
    #[case(&"x".repeat(101), &["Name must be less than 100 characters"])]
    fn name_rules(
        mut valid_request: CreateTerritoryRequest,
        #[case] name: &str,
        #[case] expected: &[&str],
    ) {
        valid_request.name = name.to_owned();
        let failure = validate_territory(&valid_request).expect_err("invalid name");
        assert_eq!(messages_for(&failure, "name"), expected);
    }

    #[rstest]
    #[case("x".repeat(100))]
    #[case("é".repeat(100))]
    fn name_length_counts_characters(
        mut valid_request: CreateTerritoryRequest,
        #[case] name: String,
    ) {
        valid_request.name = name;
        assert!(validate_territory(&valid_request).is_ok());
    }

    #[rstest]
    fn zip_codes_are_reported_per_element(mut valid_request: CreateTerritoryRequest) {
        valid_request.zip_codes = vec![
            "98101".to_owned(),
            "9810".to_owned(),
            "98103".to_owned(),
            "ABCDE".to_owned(),
        ];

        let failure = validate_territory(&valid_request).expect_err("bad zips");
        assert_eq!(
            messages_for(&failure, "zipcodes"),
            vec![
                "element 2 (\"9810\") is not a valid 5-digit zip code".to_owned(),
                "element 4 (\"ABCDE\") is not a valid 5-digit zip code".to_owned(),
            ]
        );
    }

    #[rstest]
    fn empty_zip_list_only_reports_required(mut valid_request: CreateTerritoryRequest) {
        valid_request.zip_codes.clear();
        let failure = validate_territory(&valid_request).expect_err("no zips");
        assert_eq!(
            messages_for(&failure, "zipcodes"),
            vec!["At least one zip code is required".to_owned()]
        );
    }

    #[rstest]
    #[case(json!({ "": "x" }), "\":x\"")]
    #[case(json!({ "region": "" }), "region:")]
    #[case(json!({ "region": null }), "region:")]
    fn demographics_require_key_and_value(
        mut valid_request: CreateTerritoryRequest,
        #[case] demographics: serde_json::Value,
        #[case] quoted: &str,
    ) {
        valid_request.demographics = serde_json::from_value(demographics).expect("demographics");

        let failure = validate_territory(&valid_request).expect_err("bad demographics");
        let messages = messages_for(&failure, "demographics");
        assert_eq!(messages.len(), 1);
        let message = messages.first().expect("one message");
        assert!(message.contains(quoted), "{message}");
        assert!(message.ends_with("must contain both a name and value {<name>:<value>}"));
    }

    #[rstest]
    #[case(json!({ "nested": { "a": 1 } }))]
    #[case(json!({ "list": [] }))]
    #[case(json!({ "flag": false }))]
    #[case(json!({ "zero": 0 }))]
    fn non_scalar_and_falsy_values_pass(
        mut valid_request: CreateTerritoryRequest,
        #[case] demographics: serde_json::Value,
    ) {
        valid_request.demographics = serde_json::from_value(demographics).expect("demographics");
        assert!(validate_territory(&valid_request).is_ok());
    }

    #[rstest]
    fn update_payloads_use_the_same_rules() {
        let request = UpdateTerritoryRequest {
            name: "Central".to_owned(),
            zip_codes: vec!["6060".to_owned()],
            demographics: Demographics::new(),
        };
        let failure = validate_territory(&request).expect_err("bad zip");
        assert_eq!(failure.field_errors().len(), 1);
    }

    #[rstest]
    fn failure_converts_to_domain_error() {
        let failure = validate_territory(&CreateTerritoryRequest::default()).expect_err("empty");
        let error = Error::from(failure);
        assert_eq!(error.code(), crate::domain::ErrorCode::ValidationFailed);
        assert_eq!(error.field_errors().map(FieldErrors::len), Some(2));
    }
}
