use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::domain::blog::post::is_valid_status;
use crate::errors::code_error::CodeErrorResp;
use crate::util::validate::{finish, push_err, reject_blank};

/// Partial update: absent fields stay untouched. For the nullable
/// columns an explicit `null` is a set-to-NULL, which the double
/// `Option` keeps apart from "field not sent".
#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, ToSchema)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub excerpt: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub featured_image: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub category_id: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// Any value that made it into the body, null included, is Some(..).
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), CodeErrorResp> {
        let mut errors = Vec::new();

        reject_blank(&mut errors, "title", self.title.as_deref());
        reject_blank(&mut errors, "content", self.content.as_deref());

        if let Some(status) = self.status.as_deref()
            && !is_valid_status(status)
        {
            push_err(&mut errors, "status", "status must be draft or published");
        }

        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_subset_is_fine() {
        assert!(UpdatePostRequest::default().validate().is_ok());
    }

    #[test]
    fn present_but_blank_title_is_rejected() {
        let resp = UpdatePostRequest {
            title: Some("  ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(resp.fields[0].field, "title");
    }

    #[test]
    fn explicit_null_differs_from_absent() {
        let request: UpdatePostRequest =
            serde_json::from_str(r#"{"excerpt": null, "category_id": 3}"#).unwrap();

        assert_eq!(request.excerpt, Some(None));
        assert_eq!(request.category_id, Some(Some(3)));
        assert_eq!(request.featured_image, None);
    }

    #[test]
    fn absent_nullable_fields_are_not_serialized() {
        let body = serde_json::to_value(UpdatePostRequest {
            excerpt: Some(None),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"excerpt": null}));
    }
}
