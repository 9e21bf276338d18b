use utoipa::ToSchema;

use crate::errors::code_error::CodeErrorResp;
use crate::util::validate::{finish, require_non_empty};

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

impl UpdateCommentRequest {
    pub fn validate(self) -> Result<String, CodeErrorResp> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "content", self.content.as_deref());
        finish(errors)?;

        Ok(self.content.unwrap_or_default())
    }
}
