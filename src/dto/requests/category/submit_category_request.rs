use utoipa::ToSchema;

use crate::errors::code_error::CodeErrorResp;
use crate::util::validate::{check_max_len, finish, require_non_empty};

pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, ToSchema)]
pub struct SubmitCategoryRequest {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct ValidSubmitCategory {
    pub name: String,
    pub description: Option<String>,
}

impl SubmitCategoryRequest {
    pub fn validate(self) -> Result<ValidSubmitCategory, CodeErrorResp> {
        let mut errors = Vec::new();

        require_non_empty(&mut errors, "name", self.name.as_deref());
        check_max_len(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        );

        finish(errors)?;

        Ok(ValidSubmitCategory {
            name: self.name.unwrap_or_default(),
            description: self.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_description_is_rejected() {
        let resp = SubmitCategoryRequest {
            name: Some("Science".to_string()),
            description: Some("x".repeat(MAX_DESCRIPTION_LEN + 1)),
        }
        .validate()
        .unwrap_err();

        assert_eq!(resp.fields[0].field, "description");
    }
}
