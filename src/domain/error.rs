use thiserror::Error;

/// Kind of store write that was not acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Insert,
    Update,
}

impl std::fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Reference not found: {message}")]
    ReferenceNotFound { message: String },

    #[error("Store write failed ({operation}): {message}")]
    StoreWrite {
        operation: WriteOperation,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn reference_not_found(message: impl Into<String>) -> Self {
        Self::ReferenceNotFound {
            message: message.into(),
        }
    }

    pub fn insert_failed(message: impl Into<String>) -> Self {
        Self::StoreWrite {
            operation: WriteOperation::Insert,
            message: message.into(),
        }
    }

    pub fn update_failed(message: impl Into<String>) -> Self {
        Self::StoreWrite {
            operation: WriteOperation::Update,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// True for failures caused by caller input rather than infrastructure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Validation { .. }
                | Self::InvalidId { .. }
                | Self::ReferenceNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Team 'abc' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Team name cannot be empty");
        assert_eq!(error.to_string(), "Validation error: Team name cannot be empty");
    }

    #[test]
    fn test_store_write_errors_carry_operation() {
        let error = DomainError::insert_failed("no id returned");
        assert_eq!(error.to_string(), "Store write failed (insert): no id returned");
        assert!(matches!(
            error,
            DomainError::StoreWrite {
                operation: WriteOperation::Insert,
                ..
            }
        ));

        let error = DomainError::update_failed("team vanished");
        assert_eq!(error.to_string(), "Store write failed (update): team vanished");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::invalid_id("x").is_client_error());
        assert!(DomainError::reference_not_found("x").is_client_error());
        assert!(!DomainError::cache("x").is_client_error());
        assert!(!DomainError::update_failed("x").is_client_error());
    }
}
