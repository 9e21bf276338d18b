use utoipa::ToSchema;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::code_error::CodeErrorResp;
use crate::util::string::validations::{validate_password_form, validate_username};
use crate::util::validate::{finish, push_err, require_non_empty};

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Zeroize, ZeroizeOnDrop, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Shape-checked registration payload. Still carries the plaintext
/// password, so it zeroizes on drop like the raw request.
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<ValidRegistration, CodeErrorResp> {
        let mut errors = Vec::new();

        require_non_empty(&mut errors, "username", self.username.as_deref());
        require_non_empty(&mut errors, "email", self.email.as_deref());
        require_non_empty(&mut errors, "password", self.password.as_deref());

        if let Some(username) = self.username.as_deref()
            && !username.trim().is_empty()
            && !validate_username(username)
        {
            push_err(
                &mut errors,
                "username",
                "username must be 3-32 characters of letters, digits or underscores",
            );
        }

        if let Some(email) = self.email.as_deref()
            && !email.trim().is_empty()
            && !email_address::EmailAddress::is_valid(email)
        {
            push_err(&mut errors, "email", "email is not a valid address");
        }

        if let Some(password) = self.password.as_deref()
            && !password.is_empty()
            && !validate_password_form(password)
        {
            push_err(
                &mut errors,
                "password",
                "password must be at least 8 characters",
            );
        }

        finish(errors)?;

        Ok(ValidRegistration {
            username: self.username.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_problems_reported_at_once() {
        let request = RegisterRequest {
            username: Some("x".to_string()),
            email: Some("not-an-email".to_string()),
            password: Some("short".to_string()),
        };

        let resp = request.validate().unwrap_err();
        let fields: Vec<&str> = resp.fields.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "email", "password"]);
    }

    #[test]
    fn valid_payload_passes_through() {
        let request = RegisterRequest {
            username: Some("reader_1".to_string()),
            email: Some("reader@example.com".to_string()),
            password: Some("longenough".to_string()),
        };

        let valid = request.validate().unwrap();
        assert_eq!(valid.username, "reader_1");
        assert_eq!(valid.email, "reader@example.com");
    }

    #[test]
    fn missing_fields_are_required_not_empty() {
        let request = RegisterRequest {
            username: None,
            email: None,
            password: None,
        };

        let resp = request.validate().unwrap_err();
        assert_eq!(resp.fields.len(), 3);
        assert!(resp.fields[0].message.contains("required"));
    }
}
