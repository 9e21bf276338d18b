use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable, Selectable};
use utoipa::ToSchema;

use crate::schema::users;

/// Full row, password hash included. Never serialized onto the wire.
#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The projection every API response uses.
#[derive(
    Clone,
    Debug,
    serde_derive::Serialize,
    serde_derive::Deserialize,
    Queryable,
    Selectable,
    ToSchema,
)]
#[diesel(table_name = users)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
