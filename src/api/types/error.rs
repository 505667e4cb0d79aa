//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, WriteOperation};

/// Error categories reported in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    UnprocessableEntityError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::UnprocessableEntityError => write!(f, "unprocessable_entity_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    /// A referenced entity does not exist
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::UnprocessableEntityError,
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if !err.is_client_error() {
            tracing::error!(error = %err, "Request failed");
        }

        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => Self::bad_request(message).with_param("id"),
            DomainError::ReferenceNotFound { message } => {
                Self::unprocessable(message).with_code("reference_not_found")
            }
            DomainError::StoreWrite { operation, message } => {
                let code = match operation {
                    WriteOperation::Insert => "insert_failed",
                    WriteOperation::Update => "update_failed",
                };
                Self::internal(message).with_code(code)
            }
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
            DomainError::Storage { message } => Self::unavailable(message),
            DomainError::Cache { message } => Self::unavailable(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_with_param() {
        let err = ApiError::bad_request("Invalid value")
            .with_param("bracketSize")
            .with_code("invalid_type");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param, Some("bracketSize".to_string()));
        assert_eq!(err.response.error.code, Some("invalid_type".to_string()));
    }

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::invalid_id("bad"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
            (DomainError::validation("empty"), StatusCode::BAD_REQUEST),
            (
                DomainError::reference_not_found("no user"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::insert_failed("nope"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::storage("down"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::cache("down"), StatusCode::SERVICE_UNAVAILABLE),
            (
                DomainError::configuration("bad"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (domain_err, status) in cases {
            let label = domain_err.to_string();
            assert_eq!(ApiError::from(domain_err).status, status, "{label}");
        }
    }

    #[test]
    fn test_invalid_id_names_param() {
        let api_err: ApiError = DomainError::invalid_id("'x' is not a valid team id").into();

        assert_eq!(api_err.response.error.param.as_deref(), Some("id"));
        assert_eq!(api_err.response.error.message, "'x' is not a valid team id");
    }

    #[test]
    fn test_store_write_code() {
        let api_err: ApiError = DomainError::update_failed("gone").into();
        assert_eq!(api_err.response.error.code.as_deref(), Some("update_failed"));
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::not_found("Team 'x' not found");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "not_found_error");
        assert_eq!(json["error"]["message"], "Team 'x' not found");
        assert!(json["error"].get("param").is_none());
    }
}
