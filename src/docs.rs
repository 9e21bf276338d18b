//! OpenAPI documentation registration for Swagger UI.
//!
//! Important: Utoipa only exposes operations you list in `#[openapi(paths(...))]`.
//! Handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

// ---- handlers (for `paths(...)`) ----
use crate::handlers::{
    auth::register,
    blog::{delete_post, get_posts, get_user_posts, read_post, submit_post, update_post},
    category::{get_categories, read_category, submit_category},
    comment::{delete_comment, get_comments, submit_comment},
    server::healthcheck,
};

// ---- schemas (for `components(schemas(...))`) ----
use crate::domain::{
    auth::user::PublicUser,
    blog::{
        category::{Category, CategoryWithCount},
        comment::{Comment, CommentWithMeta},
        post::{Post, PostWithMeta},
    },
};
use crate::dto::{
    requests::{
        auth::{login_request::LoginRequest, register_request::RegisterRequest},
        blog::{
            get_posts_request::GetPostsRequest, get_user_posts_request::GetUserPostsRequest,
            submit_post_request::SubmitPostRequest, update_post_request::UpdatePostRequest,
        },
        category::submit_category_request::SubmitCategoryRequest,
        comment::{
            submit_comment_request::SubmitCommentRequest,
            update_comment_request::UpdateCommentRequest,
        },
    },
    responses::{
        auth::{
            logout_response::LogoutResponse, me_response::MeResponse,
            session_response::SessionResponse,
        },
        blog::{
            delete_post_response::DeletePostResponse, get_posts_response::GetPostsResponse,
            post_response::PostResponse,
        },
        category::{
            category_response::CategoryResponse, get_categories_response::GetCategoriesResponse,
        },
        comment::{
            comment_response::CommentResponse, delete_comment_response::DeleteCommentResponse,
            get_comments_response::GetCommentsResponse,
        },
    },
};
use crate::errors::code_error::CodeErrorResp;
use crate::handlers::server::healthcheck::HealthcheckResponse;

/// Central OpenAPI document for Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        // --- server ---
        healthcheck::healthcheck,

        // --- auth ---
        register::register_handler,

        // --- blog ---
        get_posts::get_posts,
        read_post::read_post,
        get_user_posts::get_user_posts,
        submit_post::submit_post,
        update_post::update_post,
        delete_post::delete_post,

        // --- category ---
        get_categories::get_categories,
        read_category::read_category,
        submit_category::submit_category,

        // --- comment ---
        get_comments::get_comments,
        submit_comment::submit_comment,
        delete_comment::delete_comment,
    ),
    components(
        schemas(
            // shared error response
            CodeErrorResp,

            // --- auth DTOs ---
            RegisterRequest,
            LoginRequest,
            SessionResponse,
            MeResponse,
            LogoutResponse,

            // --- blog DTOs ---
            GetPostsRequest,
            GetUserPostsRequest,
            GetPostsResponse,
            SubmitPostRequest,
            UpdatePostRequest,
            PostResponse,
            DeletePostResponse,

            // --- category DTOs ---
            SubmitCategoryRequest,
            GetCategoriesResponse,
            CategoryResponse,

            // --- comment DTOs ---
            SubmitCommentRequest,
            UpdateCommentRequest,
            GetCommentsResponse,
            CommentResponse,
            DeleteCommentResponse,

            // --- server DTOs ---
            HealthcheckResponse,

            // --- domain models used in responses ---
            PublicUser,
            Post,
            PostWithMeta,
            Category,
            CategoryWithCount,
            Comment,
            CommentWithMeta,
        )
    ),
    modifiers(&BearerTokenAddon),
    tags(
        (name = "server", description = "Server status endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "blog", description = "Post endpoints"),
        (name = "category", description = "Category endpoints"),
        (name = "comment", description = "Comment endpoints")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_token` scheme the protected paths reference.
struct BearerTokenAddon;

impl Modify for BearerTokenAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("UUID")
                        .build(),
                ),
            );
        }
    }
}
