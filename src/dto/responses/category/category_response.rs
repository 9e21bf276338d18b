use utoipa::ToSchema;

use crate::domain::blog::category::CategoryWithCount;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category: CategoryWithCount,
}
