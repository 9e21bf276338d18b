use utoipa::ToSchema;

use crate::domain::blog::post::PostWithMeta;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct GetPostsResponse {
    pub posts: Vec<PostWithMeta>,
}
