use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::{
        comment::{Comment, CommentWithMeta},
        post::STATUS_PUBLISHED,
    },
    dto::responses::{comment::get_comments_response::GetCommentsResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::identity::AuthStatus,
    schema::{comments, posts, users},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/comments/post/{post_id}",
    tag = "comment",
    params(("post_id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments on the post, oldest first; empty when the post does not exist", body = GetCommentsResponse),
        (status = 404, description = "Post not found or unauthorized", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn get_comments(
    State(state): State<Arc<ServerState>>,
    Extension(auth_status): Extension<AuthStatus>,
    Path(post_id): Path<i32>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    // Comments inherit the post's visibility.
    let post: Option<(String, i32)> = posts::table
        .filter(posts::id.eq(post_id))
        .select((posts::status, posts::author_id))
        .first(&mut conn)
        .await
        .optional()
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    match thread_visibility(post.as_ref(), auth_status.user_id()) {
        ThreadVisibility::Listed => {}
        // A post that never existed has an empty thread, not a 404.
        ThreadVisibility::Empty => {
            drop(conn);
            return Ok(http_resp(
                GetCommentsResponse {
                    comments: Vec::new(),
                },
                (),
                start,
            ));
        }
        ThreadVisibility::Hidden => return Err(CodeError::POST_NOT_FOUND.into()),
    }

    let rows: Vec<(Comment, String, Option<String>)> = comments::table
        .inner_join(users::table)
        .filter(comments::post_id.eq(post_id))
        .order(comments::created_at.asc())
        .select((Comment::as_select(), users::username, users::avatar))
        .load(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    drop(conn);

    let comments: Vec<CommentWithMeta> = rows.into_iter().map(CommentWithMeta::from).collect();

    Ok(http_resp(GetCommentsResponse { comments }, (), start))
}

#[derive(Debug, PartialEq)]
enum ThreadVisibility {
    /// Post is readable by this caller; list its comments.
    Listed,
    /// Post does not exist; the thread is simply empty.
    Empty,
    /// Post exists but this caller may not see it.
    Hidden,
}

fn thread_visibility(post: Option<&(String, i32)>, caller: Option<i32>) -> ThreadVisibility {
    match post {
        None => ThreadVisibility::Empty,
        Some((status, author_id)) => {
            if status.as_str() == STATUS_PUBLISHED || caller == Some(*author_id) {
                ThreadVisibility::Listed
            } else {
                ThreadVisibility::Hidden
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blog::post::STATUS_DRAFT;

    #[test]
    fn missing_post_has_an_empty_thread() {
        assert_eq!(thread_visibility(None, None), ThreadVisibility::Empty);
        assert_eq!(thread_visibility(None, Some(1)), ThreadVisibility::Empty);
    }

    #[test]
    fn published_post_is_listed_for_anyone() {
        let post = (STATUS_PUBLISHED.to_string(), 7);
        assert_eq!(
            thread_visibility(Some(&post), None),
            ThreadVisibility::Listed
        );
    }

    #[test]
    fn draft_is_listed_only_for_its_author() {
        let post = (STATUS_DRAFT.to_string(), 7);
        assert_eq!(
            thread_visibility(Some(&post), Some(7)),
            ThreadVisibility::Listed
        );
        assert_eq!(
            thread_visibility(Some(&post), Some(8)),
            ThreadVisibility::Hidden
        );
        assert_eq!(thread_visibility(Some(&post), None), ThreadVisibility::Hidden);
    }
}
