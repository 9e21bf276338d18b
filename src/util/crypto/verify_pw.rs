use anyhow::Result;
use argon2::{Argon2, PasswordVerifier, password_hash::PasswordHash};

/// Ok(false) on a mismatch; Err only for malformed hashes or infra failures.
pub async fn verify_pw(password: &str, expected_hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let expected_hash = expected_hash.to_owned();
    tokio::task::spawn_blocking(move || {
        let argon2 = Argon2::default();
        let parsed_hash =
            PasswordHash::new(&expected_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow::anyhow!(e.to_string())),
        }
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::verify_pw;
    use crate::util::crypto::hash_pw::hash_pw;

    #[tokio::test]
    async fn hash_then_verify_roundtrip() {
        let hash = hash_pw("correct horse".to_string()).await.unwrap();
        assert!(verify_pw("correct horse", &hash).await.unwrap());
        assert!(!verify_pw("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_an_error_not_a_mismatch() {
        assert!(verify_pw("whatever", "not-a-phc-string").await.is_err());
    }
}
