use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use utoipa::ToSchema;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
}

impl CodeError {
    pub const POOL_ERROR: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not get conn out of pool!",
    };
    pub const DB_QUERY_ERROR: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database query failed!",
    };
    pub const DB_INSERTION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database insertion failed!",
    };
    pub const DB_UPDATE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database update failed!",
    };
    pub const DB_DELETION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database deletion failed!",
    };
    pub const SESSION_CREATE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 5,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not create session!",
    };

    pub const VALIDATION_FAILED: CodeError = CodeError {
        success: false,
        error_code: 10,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Request validation failed!",
    };
    pub const USERNAME_TAKEN: CodeError = CodeError {
        success: false,
        error_code: 11,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Username is already taken!",
    };
    pub const EMAIL_TAKEN: CodeError = CodeError {
        success: false,
        error_code: 12,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Email is already registered!",
    };
    pub const CATEGORY_NAME_TAKEN: CodeError = CodeError {
        success: false,
        error_code: 13,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Category already exists!",
    };

    pub const UNAUTHORIZED_ACCESS: CodeError = CodeError {
        success: false,
        error_code: 20,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Missing or invalid bearer token!",
    };
    pub const INVALID_CREDENTIALS: CodeError = CodeError {
        success: false,
        error_code: 21,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Invalid email or password!",
    };

    // Ownership misses share these constants with plain lookups on purpose:
    // callers must not be able to tell "absent" from "not yours".
    pub const POST_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 30,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Post not found or unauthorized!",
    };
    pub const CATEGORY_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 31,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Category not found!",
    };
    pub const COMMENT_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 32,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Comment not found or unauthorized!",
    };

    pub const COULD_NOT_HASH_PW: CodeError = CodeError {
        success: false,
        error_code: 40,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not hash password!",
    };
    pub const COULD_NOT_VERIFY_PW: CodeError = CodeError {
        success: false,
        error_code: 41,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not verify password!",
    };
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq, ToSchema)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

pub fn code_err(cerr: CodeError, e: impl fmt::Display) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message.to_string(),
        error_message: e.to_string(),
        fields: Vec::new(),
    }
}

/// 400 carrying per-field detail; the one place validation failures are shaped.
pub fn validation_err(fields: Vec<FieldError>) -> CodeErrorResp {
    CodeErrorResp {
        success: false,
        error_code: CodeError::VALIDATION_FAILED.error_code,
        http_status_code: CodeError::VALIDATION_FAILED.http_status_code,
        message: CodeError::VALIDATION_FAILED.message.to_string(),
        error_message: String::new(),
        fields,
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    pub message: String,
    pub error_message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        CodeErrorResp {
            success: cerr.success,
            error_code: cerr.error_code,
            http_status_code: cerr.http_status_code,
            message: cerr.message.to_string(),
            error_message: String::new(),
            fields: Vec::new(),
        }
    }
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(
            "Error occurred: status_code={}, error_code={}, message='{}', error_message='{}'",
            self.http_status_code,
            self.error_code,
            self.message,
            self.error_message
        );
        let body = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        (self.http_status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_taxonomy() {
        assert_eq!(CodeError::VALIDATION_FAILED.http_status_code.as_u16(), 400);
        assert_eq!(CodeError::USERNAME_TAKEN.http_status_code.as_u16(), 400);
        assert_eq!(CodeError::UNAUTHORIZED_ACCESS.http_status_code.as_u16(), 401);
        assert_eq!(CodeError::POST_NOT_FOUND.http_status_code.as_u16(), 404);
        assert_eq!(CodeError::DB_QUERY_ERROR.http_status_code.as_u16(), 500);
    }

    #[test]
    fn validation_err_serializes_field_detail() {
        let resp = validation_err(vec![FieldError {
            field: "title",
            message: "Title is required".to_string(),
        }]);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["http_status_code"], 400);
        assert_eq!(json["fields"][0]["field"], "title");
        assert_eq!(json["fields"][0]["message"], "Title is required");
    }

    #[test]
    fn empty_field_list_is_omitted_from_the_wire() {
        let resp: CodeErrorResp = CodeError::POST_NOT_FOUND.into();
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("fields").is_none());
    }
}
