use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable, Selectable};
use diesel::{ExpressionMethods, NullableExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel::SelectableHelper;
use utoipa::ToSchema;

use crate::schema::{categories, posts, users};

pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_DRAFT: &str = "draft";

pub fn is_valid_status(status: &str) -> bool {
    status == STATUS_PUBLISHED || status == STATUS_DRAFT
}

#[derive(
    Clone,
    Debug,
    serde_derive::Serialize,
    serde_derive::Deserialize,
    Queryable,
    Selectable,
    ToSchema,
)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post joined with its display associations, so responses are
/// self-contained and the client never has to join.
#[derive(Clone, Debug, serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct PostWithMeta {
    #[serde(flatten)]
    pub post: Post,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub category_name: Option<String>,
}

type PostJoinRow = (Post, String, Option<String>, Option<String>);

impl From<PostJoinRow> for PostWithMeta {
    fn from((post, author_name, author_avatar, category_name): PostJoinRow) -> Self {
        Self {
            post,
            author_name,
            author_avatar,
            category_name,
        }
    }
}

/// Single-row joined fetch used by every post write for its response.
/// Visibility rules are the caller's problem; this returns any status.
pub async fn fetch_post_with_meta(
    conn: &mut AsyncPgConnection,
    post_id: i32,
) -> Result<Option<PostWithMeta>, diesel::result::Error> {
    let row: Option<PostJoinRow> = posts::table
        .inner_join(users::table)
        .left_join(categories::table)
        .filter(posts::id.eq(post_id))
        .select((
            Post::as_select(),
            users::username,
            users::avatar,
            categories::name.nullable(),
        ))
        .first(conn)
        .await
        .optional()?;

    Ok(row.map(PostWithMeta::from))
}

#[derive(Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub excerpt: Option<&'a str>,
    pub featured_image: Option<&'a str>,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub status: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lifecycle_values() {
        assert!(is_valid_status("published"));
        assert!(is_valid_status("draft"));
        assert!(!is_valid_status("archived"));
        assert!(!is_valid_status("Published"));
    }
}
