use thiserror::Error;

use crate::api::ApiError;
use crate::utils::config::ConfigError;
use crate::utils::session_store::StoreError;
use crate::utils::validation::ValidationErrors;

/// Any failure a screen can run into; its `Display` is what the user sees
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not start background worker: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("Background task stopped before finishing")]
    TaskLost,
}

impl AppError {
    /// A 401 from the API; the stored session is no longer valid
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_unauthorized())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_transparent() {
        let err: AppError = ValidationErrors::single("name", "Name is required").into();
        assert_eq!(err.to_string(), "Name is required");

        let err: AppError = ApiError::Status { status: 401, message: "Invalid token".into() }.into();
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid token");
    }
}
