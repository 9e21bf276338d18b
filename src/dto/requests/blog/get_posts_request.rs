use utoipa::ToSchema;

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, Default, Clone, ToSchema)]
pub struct GetPostsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl GetPostsRequest {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamping() {
        let request = GetPostsRequest::default();
        assert_eq!(request.limit(), 10);
        assert_eq!(request.offset(), 0);

        let request = GetPostsRequest {
            limit: Some(10_000),
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(request.limit(), MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }
}
