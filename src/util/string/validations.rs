/// 3-32 chars, alphanumeric or underscore.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (3..=32).contains(&len) && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Minimum length only; anything printable is allowed.
pub fn validate_password_form(password: &str) -> bool {
    password.chars().count() >= 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames() {
        assert!(validate_username("reader_1"));
        assert!(validate_username("abc"));
        assert!(!validate_username("ab"));
        assert!(!validate_username("has space"));
        assert!(!validate_username("dot.ted"));
        assert!(!validate_username(&"x".repeat(33)));
    }

    #[test]
    fn passwords() {
        assert!(validate_password_form("longenough"));
        assert!(!validate_password_form("short"));
    }
}
