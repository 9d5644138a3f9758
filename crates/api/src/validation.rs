//! Request body validation.
//!
//! Handlers deserialize into request types whose fields are all optional,
//! then run them through a [`Validator`] so that every problem in the body
//! is reported at once, as `{field, message, code}` issues.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{ApiError, ValidationIssue};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

pub const CODE_INVALID_TYPE: &str = "invalid_type";
pub const CODE_INVALID_STRING: &str = "invalid_string";
pub const CODE_TOO_SMALL: &str = "too_small";
pub const CODE_INVALID_ENUM_VALUE: &str = "invalid_enum_value";

/// Collects field-level issues across a request body.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: &str, code: &str) {
        self.issues.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
            code: code.to_string(),
        });
    }

    /// Require a string field to be present. Returns the value for
    /// follow-up checks when it is.
    pub fn require<'a>(&mut self, field: &str, value: &'a Option<Value>) -> Option<&'a str> {
        match value {
            None => {
                self.push(field, "Required", CODE_INVALID_TYPE);
                None
            }
            Some(value) => self.expect_string(field, value),
        }
    }

    /// Check an optional string field. Absence is fine, a wrong type is
    /// still an issue.
    pub fn optional_str<'a>(&mut self, field: &str, value: &'a Option<Value>) -> Option<&'a str> {
        value.as_ref().and_then(|value| self.expect_string(field, value))
    }

    fn expect_string<'a>(&mut self, field: &str, value: &'a Value) -> Option<&'a str> {
        match value {
            Value::String(value) => Some(value),
            other => {
                self.push(
                    field,
                    &format!("Expected string, received {}", json_type_name(other)),
                    CODE_INVALID_TYPE,
                );
                None
            }
        }
    }

    /// Check email format.
    pub fn email(&mut self, field: &str, value: &str) {
        if !EMAIL_REGEX.is_match(value) {
            self.push(field, "Invalid email", CODE_INVALID_STRING);
        }
    }

    /// Check a minimum character count.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.push(
                field,
                &format!("String must contain at least {min} character(s)"),
                CODE_TOO_SMALL,
            );
        }
    }

    /// Check an enum-valued field against a parser, returning the parsed
    /// value when it is valid.
    pub fn enum_value<T>(
        &mut self,
        field: &str,
        value: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        match parse(value) {
            Some(parsed) => Some(parsed),
            None => {
                self.push(field, "Invalid enum value", CODE_INVALID_ENUM_VALUE);
                None
            }
        }
    }

    /// Finish validation, failing with a `ValidationError` response when
    /// any issue was recorded.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(self.issues))
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issues(validator: Validator) -> Vec<ValidationIssue> {
        match validator.finish() {
            Err(ApiError::Validation(issues)) => issues,
            Ok(()) => Vec::new(),
            Err(_) => panic!("expected validation error"),
        }
    }

    #[test]
    fn missing_fields_report_invalid_type() {
        let mut validator = Validator::new();
        validator.require("name", &None);
        validator.require("email", &None);

        let issues = issues(validator);
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .all(|issue| issue.code == CODE_INVALID_TYPE && issue.message == "Required"));
        assert_eq!(issues[0].field, "name");
        assert_eq!(issues[1].field, "email");
    }

    #[test]
    fn bad_email_reports_invalid_string() {
        let mut validator = Validator::new();
        validator.email("email", "not-an-email");

        let issues = issues(validator);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "email");
        assert_eq!(issues[0].code, CODE_INVALID_STRING);
        assert_eq!(issues[0].message, "Invalid email");
    }

    #[test]
    fn valid_email_passes() {
        let mut validator = Validator::new();
        validator.email("email", "joao@example.com");
        assert!(validator.finish().is_ok());
    }

    #[test]
    fn short_password_reports_too_small() {
        let mut validator = Validator::new();
        validator.min_len("password", "12345", 6);

        let issues = issues(validator);
        assert_eq!(issues[0].field, "password");
        assert_eq!(issues[0].code, CODE_TOO_SMALL);
        assert_eq!(
            issues[0].message,
            "String must contain at least 6 character(s)"
        );
    }

    #[test]
    fn unknown_enum_value_is_reported() {
        let mut validator = Validator::new();
        let parsed =
            validator.enum_value("status", "returned", orderhub_database::DeliveryStatus::parse);

        assert!(parsed.is_none());
        let issues = issues(validator);
        assert_eq!(issues[0].code, CODE_INVALID_ENUM_VALUE);
    }

    #[test]
    fn wrong_typed_fields_report_invalid_type() {
        let mut validator = Validator::new();
        validator.require("name", &Some(json!(123)));
        validator.optional_str("role", &Some(json!(["sale"])));

        let issues = issues(validator);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, CODE_INVALID_TYPE);
        assert_eq!(issues[0].message, "Expected string, received number");
        assert_eq!(issues[1].field, "role");
        assert_eq!(issues[1].message, "Expected string, received array");
    }

    #[test]
    fn absent_optional_field_is_not_an_issue() {
        let mut validator = Validator::new();
        assert!(validator.optional_str("role", &None).is_none());
        assert!(validator.finish().is_ok());
    }

    #[test]
    fn several_checks_accumulate() {
        let mut validator = Validator::new();
        validator.require("name", &None);
        if let Some(email) = validator.require("email", &Some(json!("bad"))) {
            validator.email("email", email);
        }
        if let Some(password) = validator.require("password", &Some(json!("123"))) {
            validator.min_len("password", password, 6);
        }

        let issues = issues(validator);
        let codes: Vec<&str> = issues.iter().map(|issue| issue.code.as_str()).collect();
        assert_eq!(codes, ["invalid_type", "invalid_string", "too_small"]);
    }
}
