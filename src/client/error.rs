use thiserror::Error;

/// The error envelope the server emits, owned so callers can hold onto it.
#[derive(Clone, Debug, serde_derive::Deserialize)]
pub struct ApiErrorBody {
    pub error_code: u16,
    pub http_status_code: u16,
    pub message: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub fields: Vec<ApiFieldError>,
}

#[derive(Clone, Debug, serde_derive::Deserialize)]
pub struct ApiFieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server said {status}: {}", body.message)]
    Api { status: u16, body: ApiErrorBody },

    #[error("session store error: {0}")]
    SessionStore(#[from] std::io::Error),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The signal to throw away a stored token and start over.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Per-field messages on a 400, empty for every other failure.
    pub fn field_errors(&self) -> &[ApiFieldError] {
        match self {
            ClientError::Api { body, .. } => &body.fields,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_parses_without_optional_parts() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"success":false,"error_code":30,"http_status_code":404,"message":"Post not found or unauthorized!"}"#,
        )
        .unwrap();

        assert_eq!(body.error_code, 30);
        assert!(body.fields.is_empty());
    }

    #[test]
    fn unauthorized_detection() {
        let err = ClientError::Api {
            status: 401,
            body: ApiErrorBody {
                error_code: 20,
                http_status_code: 401,
                message: "Missing or invalid bearer token!".to_string(),
                error_message: String::new(),
                fields: Vec::new(),
            },
        };

        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }
}
