use utoipa::ToSchema;

use crate::errors::code_error::CodeErrorResp;
use crate::util::validate::{finish, push_err, require_non_empty};

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, ToSchema)]
pub struct SubmitCommentRequest {
    pub content: Option<String>,
    pub post_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i32>,
}

#[derive(Debug)]
pub struct ValidSubmitComment {
    pub content: String,
    pub post_id: i32,
    pub parent_id: Option<i32>,
}

impl SubmitCommentRequest {
    pub fn validate(self) -> Result<ValidSubmitComment, CodeErrorResp> {
        let mut errors = Vec::new();

        require_non_empty(&mut errors, "content", self.content.as_deref());
        if self.post_id.is_none() {
            push_err(&mut errors, "post_id", "post_id is required");
        }

        finish(errors)?;

        Ok(ValidSubmitComment {
            content: self.content.unwrap_or_default(),
            post_id: self.post_id.unwrap_or_default(),
            parent_id: self.parent_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_is_required() {
        let resp = SubmitCommentRequest {
            content: Some("nice post".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(resp.fields[0].field, "post_id");
    }
}
