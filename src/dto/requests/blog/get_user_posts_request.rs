use utoipa::ToSchema;

use super::get_posts_request::MAX_PAGE_SIZE;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, Clone, ToSchema)]
pub struct GetUserPostsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl GetUserPostsRequest {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
