use utoipa::ToSchema;

use crate::domain::blog::post::PostWithMeta;

/// Single-post payload for reads, creates and updates.
#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct PostResponse {
    pub post: PostWithMeta,
}
