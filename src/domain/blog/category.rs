use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable, Selectable};
use utoipa::ToSchema;

use crate::schema::categories;

#[derive(
    Clone,
    Debug,
    serde_derive::Serialize,
    serde_derive::Deserialize,
    Queryable,
    Selectable,
    ToSchema,
)]
#[diesel(table_name = categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `post_count` is derived (COUNT of published posts), never stored;
/// it is 0 for categories with no published posts, including draft-only ones.
#[derive(Clone, Debug, serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: i64,
}

impl CategoryWithCount {
    pub fn from_category_and_count(category: Category, post_count: i64) -> Self {
        Self {
            category,
            post_count,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}
