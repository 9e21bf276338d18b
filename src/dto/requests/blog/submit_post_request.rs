use utoipa::ToSchema;

use crate::domain::blog::post::{STATUS_PUBLISHED, is_valid_status};
use crate::errors::code_error::CodeErrorResp;
use crate::util::validate::{finish, push_err, require_non_empty};

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, ToSchema)]
pub struct SubmitPostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug)]
pub struct ValidSubmitPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<i32>,
    pub status: String,
}

impl SubmitPostRequest {
    pub fn validate(self) -> Result<ValidSubmitPost, CodeErrorResp> {
        let mut errors = Vec::new();

        require_non_empty(&mut errors, "title", self.title.as_deref());
        require_non_empty(&mut errors, "content", self.content.as_deref());

        if let Some(status) = self.status.as_deref()
            && !is_valid_status(status)
        {
            push_err(&mut errors, "status", "status must be draft or published");
        }

        finish(errors)?;

        Ok(ValidSubmitPost {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            excerpt: self.excerpt,
            featured_image: self.featured_image,
            category_id: self.category_id,
            // Status omitted means publish immediately.
            status: self.status.unwrap_or_else(|| STATUS_PUBLISHED.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_published() {
        let valid = SubmitPostRequest {
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(valid.status, "published");
    }

    #[test]
    fn bogus_status_is_a_field_error() {
        let resp = SubmitPostRequest {
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            status: Some("archived".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(resp.fields.len(), 1);
        assert_eq!(resp.fields[0].field, "status");
    }

    #[test]
    fn title_and_content_are_required() {
        let resp = SubmitPostRequest::default().validate().unwrap_err();
        let fields: Vec<&str> = resp.fields.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "content"]);
    }
}
