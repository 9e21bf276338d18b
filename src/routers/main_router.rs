use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        auth::{
            login::login_handler, logout::logout_handler, me::me_handler,
            register::register_handler,
        },
        blog::{
            delete_post::delete_post, get_posts::get_posts, get_user_posts::get_user_posts,
            read_post::read_post, submit_post::submit_post, update_post::update_post,
        },
        category::{
            get_categories::get_categories, read_category::read_category,
            submit_category::submit_category,
        },
        comment::{
            delete_comment::delete_comment, get_comments::get_comments,
            submit_comment::submit_comment, update_comment::update_comment,
        },
        server::healthcheck::healthcheck,
    },
    init::state::ServerState,
};

use super::middleware::{
    auth::auth_middleware, identity::identity_middleware, logging::log_middleware,
};

const MAX_REQUEST_SIZE: usize = 1024 * 1024 * 2; // 2MB

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let auth = from_fn_with_state(state.clone(), auth_middleware);
    let identity_middleware = from_fn_with_state(state.clone(), identity_middleware);
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true);
    let cors_layer = CorsLayer::very_permissive();

    // Reads are public; writes hang off the same paths behind a per-method
    // auth layer, so the two cannot drift apart. The identity layer runs
    // outside everything and only annotates who (if anyone) is calling.
    let api_router = Router::new()
        .route("/api/healthcheck", get(healthcheck))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler).route_layer(auth.clone()))
        .route(
            "/api/auth/logout",
            post(logout_handler).route_layer(auth.clone()),
        )
        .route(
            "/api/posts",
            get(get_posts).merge(post(submit_post).route_layer(auth.clone())),
        )
        .route(
            "/api/posts/{id}",
            get(read_post).merge(
                put(update_post)
                    .delete(delete_post)
                    .route_layer(auth.clone()),
            ),
        )
        .route("/api/posts/user/{user_id}", get(get_user_posts))
        .route(
            "/api/categories",
            get(get_categories).merge(post(submit_category).route_layer(auth.clone())),
        )
        .route("/api/categories/{id}", get(read_category))
        .route(
            "/api/comments",
            post(submit_comment).route_layer(auth.clone()),
        )
        .route(
            "/api/comments/{id}",
            put(update_comment)
                .delete(delete_comment)
                .route_layer(auth),
        )
        .route("/api/comments/post/{post_id}", get(get_comments))
        .layer(identity_middleware)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE))
        .layer(cors_layer)
        .with_state(state.clone());

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
