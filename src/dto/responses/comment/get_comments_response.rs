use utoipa::ToSchema;

use crate::domain::blog::comment::CommentWithMeta;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct GetCommentsResponse {
    pub comments: Vec<CommentWithMeta>,
}
