//! Handler for structured-payload validation failures.

use crate::handler::{ProblemHandler, HIGHEST_PRECEDENCE};
use crate::problem::Problem;
use astraea_core::BizCode;
use std::error::Error as StdError;
use validator::ValidationErrors;

/// Maps [`ValidationErrors`] to a 400 response with one `details` entry per
/// violated field: the field path, the rejected value when the validator
/// captured one, and the violation message.
pub struct ValidationErrorsHandler;

impl ProblemHandler for ValidationErrorsHandler {
    fn name(&self) -> &'static str {
        "validation_errors"
    }

    fn priority(&self) -> i32 {
        HIGHEST_PRECEDENCE + 1000
    }

    fn handle(&self, error: &(dyn StdError + 'static)) -> Option<Problem> {
        let err = error.downcast_ref::<ValidationErrors>()?;

        let mut entries: Vec<serde_json::Value> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, violations)| {
                violations.iter().map(move |violation| {
                    let message = violation
                        .message
                        .as_ref()
                        .map_or_else(|| violation.code.to_string(), ToString::to_string);
                    serde_json::json!({
                        "field": field,
                        "value": violation.params.get("value"),
                        "message": message,
                    })
                })
            })
            .collect();
        // Field iteration order is not stable; sort for a deterministic payload.
        entries.sort_by_key(|entry| entry["field"].as_str().map(ToString::to_string));

        Some(
            Problem::new(400, BizCode::PARAM.code(), "parameter validation failed")
                .with_developer_message(err.to_string())
                .with_details(serde_json::Value::Array(entries)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    fn violation(code: &'static str, message: Option<&'static str>, value: &str) -> ValidationError {
        let mut err = ValidationError::new(code);
        err.message = message.map(Cow::from);
        err.add_param(Cow::from("value"), &value);
        err
    }

    #[test]
    fn test_details_list_violated_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("phone", violation("length", Some("must be 11 digits"), "123"));
        errors.add("email", violation("email", None, "not-an-email"));

        let problem = ValidationErrorsHandler.handle(&errors).unwrap();

        assert_eq!(problem.status, 400);
        assert_eq!(problem.code, 999);
        assert_eq!(problem.message, "parameter validation failed");

        let details = problem.details.unwrap();
        let entries = details.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        // Sorted by field name.
        assert_eq!(entries[0]["field"], "email");
        assert_eq!(entries[0]["message"], "email");
        assert_eq!(entries[1]["field"], "phone");
        assert_eq!(entries[1]["value"], "123");
        assert_eq!(entries[1]["message"], "must be 11 digits");
    }

    #[test]
    fn test_multiple_violations_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("name", violation("length", Some("too short"), ""));
        errors.add("name", violation("required", Some("must be present"), ""));

        let problem = ValidationErrorsHandler.handle(&errors).unwrap();
        let details = problem.details.unwrap();

        assert_eq!(details.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_passes_on_other_errors() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(ValidationErrorsHandler.handle(&err).is_none());
    }
}
