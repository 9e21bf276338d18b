use utoipa::ToSchema;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::code_error::CodeErrorResp;
use crate::util::validate::{finish, push_err, require_non_empty};

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Zeroize, ZeroizeOnDrop, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<ValidLogin, CodeErrorResp> {
        let mut errors = Vec::new();

        require_non_empty(&mut errors, "email", self.email.as_deref());
        require_non_empty(&mut errors, "password", self.password.as_deref());

        if let Some(email) = self.email.as_deref()
            && !email.trim().is_empty()
            && !email_address::EmailAddress::is_valid(email)
        {
            push_err(&mut errors, "email", "email is not a valid address");
        }

        finish(errors)?;

        Ok(ValidLogin {
            email: self.email.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}
