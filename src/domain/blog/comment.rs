use chrono::{DateTime, Utc};
use diesel::SelectableHelper;
use diesel::prelude::{Queryable, Selectable};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use utoipa::ToSchema;

use crate::schema::{comments, users};

#[derive(
    Clone,
    Debug,
    serde_derive::Serialize,
    serde_derive::Deserialize,
    Queryable,
    Selectable,
    ToSchema,
)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub author_id: i32,
    pub post_id: i32,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct CommentWithMeta {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: String,
    pub author_avatar: Option<String>,
}

type CommentJoinRow = (Comment, String, Option<String>);

impl From<CommentJoinRow> for CommentWithMeta {
    fn from((comment, author_name, author_avatar): CommentJoinRow) -> Self {
        Self {
            comment,
            author_name,
            author_avatar,
        }
    }
}

pub async fn fetch_comment_with_meta(
    conn: &mut AsyncPgConnection,
    comment_id: i32,
) -> Result<Option<CommentWithMeta>, diesel::result::Error> {
    let row: Option<CommentJoinRow> = comments::table
        .inner_join(users::table)
        .filter(comments::id.eq(comment_id))
        .select((Comment::as_select(), users::username, users::avatar))
        .first(conn)
        .await
        .optional()?;

    Ok(row.map(CommentWithMeta::from))
}
