use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::auth::user::PublicUser;
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
use crate::handlers::server::healthcheck::HealthcheckResponse;

use super::{
    auth::SessionContext,
    cache::QueryCache,
    error::{ApiErrorBody, ClientError},
};

/// Typed client for the HTTP API.
///
/// GET results are cached per final request URL and mutations invalidate
/// the collection they touch, so repeat listings cost nothing until
/// something actually changes. Login and logout clear the whole cache,
/// since an author's own listings include drafts other callers never see.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
    cache: QueryCache,
}

#[derive(serde_derive::Deserialize)]
struct Envelope<D> {
    data: D,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session_path: impl AsRef<Path>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: SessionContext::load(session_path),
            cache: QueryCache::new(),
        })
    }

    /// Probes a session left over from a previous run. A rejected token
    /// is dropped silently; anything else (server down, 500) is surfaced
    /// so the caller does not mistake an outage for a logged-out state.
    pub async fn init(&self) -> Result<Option<PublicUser>, ClientError> {
        let Some(token) = self.session.token() else {
            return Ok(None);
        };

        match self.me().await {
            Ok(me) => {
                // The profile may have changed since it was stored.
                self.session.set(token, me.user.clone())?;
                Ok(Some(me.user))
            }
            Err(e) if e.is_unauthorized() => {
                self.session.clear()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// The locally stored user, if any; `init` keeps it fresh.
    pub fn current_user(&self) -> Option<PublicUser> {
        self.session.user()
    }

    // ---- auth ----

    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionResponse, ClientError> {
        let response: SessionResponse = self
            .execute(self.post("/api/auth/register").json(request))
            .await?;

        self.session.set(response.token, response.user.clone())?;
        self.cache.clear().await;

        Ok(response)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<SessionResponse, ClientError> {
        let response: SessionResponse = self
            .execute(self.post("/api/auth/login").json(request))
            .await?;

        self.session.set(response.token, response.user.clone())?;
        self.cache.clear().await;

        Ok(response)
    }

    /// The local session goes away even if the server call fails; a dead
    /// server must not pin the client in a logged-in state.
    pub async fn logout(&self) -> Result<LogoutResponse, ClientError> {
        let result = self.execute(self.post("/api/auth/logout")).await;

        self.session.clear()?;
        self.cache.clear().await;

        result
    }

    pub async fn me(&self) -> Result<MeResponse, ClientError> {
        self.execute(self.get("/api/auth/me")).await
    }

    // ---- posts ----

    pub async fn get_posts(&self, request: &GetPostsRequest) -> Result<GetPostsResponse, ClientError> {
        self.cached(self.get("/api/posts").query(request)).await
    }

    pub async fn get_post(&self, post_id: i32) -> Result<PostResponse, ClientError> {
        self.cached(self.get(&format!("/api/posts/{post_id}"))).await
    }

    pub async fn get_user_posts(
        &self,
        user_id: i32,
        request: &GetUserPostsRequest,
    ) -> Result<GetPostsResponse, ClientError> {
        self.cached(
            self.get(&format!("/api/posts/user/{user_id}"))
                .query(request),
        )
        .await
    }

    pub async fn create_post(&self, request: &SubmitPostRequest) -> Result<PostResponse, ClientError> {
        let response = self.execute(self.post("/api/posts").json(request)).await?;
        self.invalidate("/api/posts").await;
        Ok(response)
    }

    pub async fn update_post(
        &self,
        post_id: i32,
        request: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        let response = self
            .execute(self.put(&format!("/api/posts/{post_id}")).json(request))
            .await?;
        self.invalidate("/api/posts").await;
        Ok(response)
    }

    pub async fn delete_post(&self, post_id: i32) -> Result<DeletePostResponse, ClientError> {
        let response = self
            .execute(self.delete(&format!("/api/posts/{post_id}")))
            .await?;
        // The post's comments died with it.
        self.invalidate("/api/posts").await;
        self.invalidate("/api/comments").await;
        Ok(response)
    }

    // ---- categories ----

    pub async fn get_categories(&self) -> Result<GetCategoriesResponse, ClientError> {
        self.cached(self.get("/api/categories")).await
    }

    pub async fn get_category(&self, category_id: i32) -> Result<CategoryResponse, ClientError> {
        self.cached(self.get(&format!("/api/categories/{category_id}")))
            .await
    }

    pub async fn create_category(
        &self,
        request: &SubmitCategoryRequest,
    ) -> Result<CategoryResponse, ClientError> {
        let response = self
            .execute(self.post("/api/categories").json(request))
            .await?;
        self.invalidate("/api/categories").await;
        Ok(response)
    }

    // ---- comments ----

    pub async fn get_comments(&self, post_id: i32) -> Result<GetCommentsResponse, ClientError> {
        self.cached(self.get(&format!("/api/comments/post/{post_id}")))
            .await
    }

    pub async fn create_comment(
        &self,
        request: &SubmitCommentRequest,
    ) -> Result<CommentResponse, ClientError> {
        let response = self.execute(self.post("/api/comments").json(request)).await?;
        self.invalidate("/api/comments").await;
        Ok(response)
    }

    pub async fn update_comment(
        &self,
        comment_id: i32,
        request: &UpdateCommentRequest,
    ) -> Result<CommentResponse, ClientError> {
        let response = self
            .execute(self.put(&format!("/api/comments/{comment_id}")).json(request))
            .await?;
        self.invalidate("/api/comments").await;
        Ok(response)
    }

    pub async fn delete_comment(
        &self,
        comment_id: i32,
    ) -> Result<DeleteCommentResponse, ClientError> {
        let response = self
            .execute(self.delete(&format!("/api/comments/{comment_id}")))
            .await?;
        self.invalidate("/api/comments").await;
        Ok(response)
    }

    // ---- server ----

    pub async fn healthcheck(&self) -> Result<HealthcheckResponse, ClientError> {
        self.execute(self.get("/api/healthcheck")).await
    }

    // ---- plumbing ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_bearer(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_bearer(self.http.post(self.url(path)))
    }

    fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_bearer(self.http.put(self.url(path)))
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_bearer(self.http.delete(self.url(path)))
    }

    fn with_bearer(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn invalidate(&self, path: &str) {
        self.cache.invalidate_prefix(&self.url(path)).await;
    }

    async fn execute<D: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<D, ClientError> {
        unwrap_envelope(request.send().await?).await
    }

    /// Cache-through GET keyed on the final URL, query string included.
    async fn cached<D>(&self, request: reqwest::RequestBuilder) -> Result<D, ClientError>
    where
        D: DeserializeOwned + serde::Serialize,
    {
        let request = request.build()?;
        let key = request.url().to_string();

        if let Some(value) = self.cache.get(&key).await {
            return Ok(serde_json::from_value(value)?);
        }

        let ticket = self.cache.begin();
        let data: D = unwrap_envelope(self.http.execute(request).await?).await?;

        self.cache
            .complete(&key, ticket, serde_json::to_value(&data)?)
            .await;

        Ok(data)
    }
}

async fn unwrap_envelope<D: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<D, ClientError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    parse_envelope(status, &bytes)
}

fn parse_envelope<D: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<D, ClientError> {
    if (200..300).contains(&status) {
        Ok(serde_json::from_slice::<Envelope<D>>(bytes)?.data)
    } else {
        // Non-JSON bodies (proxies, panics) still become a usable error.
        let body = serde_json::from_slice(bytes).unwrap_or_else(|_| ApiErrorBody {
            error_code: 0,
            http_status_code: status,
            message: String::from_utf8_lossy(bytes).into_owned(),
            error_message: String::new(),
            fields: Vec::new(),
        });

        Err(ClientError::Api { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_is_unwrapped() {
        let body =
            br#"{"success":true,"data":{"message":"Logged out successfully"},"meta":{"time_taken":"1ms"}}"#;

        let data: LogoutResponse = parse_envelope(200, body).unwrap();
        assert_eq!(data.message, "Logged out successfully");
    }

    #[test]
    fn error_body_is_carried_through() {
        let body = br#"{"success":false,"error_code":30,"http_status_code":404,"message":"Post not found or unauthorized!","error_message":""}"#;

        let err = parse_envelope::<PostResponse>(404, body).unwrap_err();
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body.error_code, 30);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_error_bodies_do_not_panic() {
        let err = parse_envelope::<PostResponse>(502, b"Bad Gateway").unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let client = ApiClient::new("http://localhost:3000/", dir.path().join("session")).unwrap();
        assert_eq!(client.url("/api/posts"), "http://localhost:3000/api/posts");
    }
}
