use utoipa::ToSchema;

use crate::domain::auth::user::PublicUser;

#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: PublicUser,
}
