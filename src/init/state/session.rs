use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_SESSION_DURATION: chrono::Duration = chrono::Duration::hours(24);

/// One live bearer token. The token itself is the map key and doubles
/// as the opaque credential handed to the client.
#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct Session {
    pub token: Uuid,
    pub user_id: i32,
    pub username: String,
    pub created_at: chrono::DateTime<Utc>,
    pub expires_at: chrono::DateTime<Utc>,
}

impl Session {
    pub fn is_unexpired(&self) -> bool {
        let now = Utc::now();

        self.created_at <= now && self.expires_at > now
    }

    pub fn get_user_id(&self) -> i32 {
        self.user_id
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_expiry(expires_at: chrono::DateTime<Utc>) -> Session {
        Session {
            token: Uuid::new_v4(),
            user_id: 1,
            username: "reader_1".to_string(),
            created_at: Utc::now() - chrono::Duration::minutes(5),
            expires_at,
        }
    }

    #[test]
    fn fresh_session_is_unexpired() {
        let session = session_with_expiry(Utc::now() + DEFAULT_SESSION_DURATION);
        assert!(session.is_unexpired());
    }

    #[test]
    fn past_expiry_is_rejected() {
        let session = session_with_expiry(Utc::now() - chrono::Duration::seconds(1));
        assert!(!session.is_unexpired());
    }
}
