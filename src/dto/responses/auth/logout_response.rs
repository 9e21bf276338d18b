use utoipa::ToSchema;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}
