use utoipa::ToSchema;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct DeletePostResponse {
    pub message: String,
    pub deleted_post_id: i32,
}
