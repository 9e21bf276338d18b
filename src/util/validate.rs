//! Shared field-presence/shape checks used by the request DTOs.
//!
//! Every endpoint validates its whole payload up front and reports all
//! offending fields in one 400, rather than failing on the first one.

use crate::errors::code_error::{CodeErrorResp, FieldError, validation_err};

pub fn push_err(errors: &mut Vec<FieldError>, field: &'static str, message: impl Into<String>) {
    errors.push(FieldError {
        field,
        message: message.into(),
    });
}

/// Required string field: must be present and non-blank.
pub fn require_non_empty(errors: &mut Vec<FieldError>, field: &'static str, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() => (),
        Some(_) => push_err(errors, field, format!("{field} cannot be empty")),
        None => push_err(errors, field, format!("{field} is required")),
    }
}

/// Optional string field: may be absent, but cannot be blank when given.
pub fn reject_blank(errors: &mut Vec<FieldError>, field: &'static str, value: Option<&str>) {
    if let Some(v) = value
        && v.trim().is_empty()
    {
        push_err(errors, field, format!("{field} cannot be empty"));
    }
}

pub fn check_max_len(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max
    {
        push_err(
            errors,
            field,
            format!("{field} must be at most {max} characters"),
        );
    }
}

pub fn finish(errors: Vec<FieldError>) -> Result<(), CodeErrorResp> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(validation_err(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_empty_flags_missing_and_blank() {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "title", None);
        require_non_empty(&mut errors, "content", Some("   "));
        require_non_empty(&mut errors, "excerpt", Some("fine"));

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "content"]);
    }

    #[test]
    fn reject_blank_allows_absence() {
        let mut errors = Vec::new();
        reject_blank(&mut errors, "title", None);
        assert!(errors.is_empty());

        reject_blank(&mut errors, "title", Some(""));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn finish_collects_everything_into_one_response() {
        let mut errors = Vec::new();
        push_err(&mut errors, "a", "bad");
        push_err(&mut errors, "b", "worse");

        let resp = finish(errors).unwrap_err();
        assert_eq!(resp.fields.len(), 2);
        assert_eq!(resp.http_status_code.as_u16(), 400);
    }
}
