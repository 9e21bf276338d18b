use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::auth::user::PublicUser;

/// Returned by both register and login.
#[derive(serde_derive::Serialize, serde_derive::Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user: PublicUser,
    pub token: Uuid,
}
