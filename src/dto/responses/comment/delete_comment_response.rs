use utoipa::ToSchema;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct DeleteCommentResponse {
    pub message: String,
    pub deleted_comment_id: i32,
}
