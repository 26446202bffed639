//! Error types for Travis CI operations.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to Travis CI.
#[derive(Debug, Error)]
pub enum TravisError {
    /// No usable credential could be derived.
    #[error("Travis configuration required: {0}")]
    ConfigMissing(String),

    /// The configured provider name is not recognized.
    #[error("Unknown CI provider '{0}': expected 'travis' or 'travis_pro'")]
    UnknownProvider(String),

    /// A repository name could not be turned into an `org/repo` slug.
    #[error("Invalid repository name '{0}': expected 'repo' with a default organization, or 'org/repo'")]
    InvalidRepoName(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed.
    #[error("Travis API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// A blocking sync did not finish before its deadline.
    #[error("Sync still running after {waited:?}")]
    SyncTimedOut { waited: Duration },

    /// A blocking sync was cancelled by the caller.
    #[error("Sync wait cancelled")]
    SyncCancelled,
}

impl TravisError {
    /// Whether the remote side reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error comes from local configuration rather than the network.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing(_) | Self::UnknownProvider(_) | Self::InvalidRepoName(_)
        )
    }
}

/// Result type alias for Travis operations.
pub type Result<T> = core::result::Result<T, TravisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = TravisError::NotFound {
            entity_type: "Repository",
            id: "acme/widgets".to_string(),
        };
        assert_eq!(err.to_string(), "Repository 'acme/widgets' not found");
        assert!(err.is_not_found());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_errors_are_classified() {
        assert!(TravisError::UnknownProvider("circle".into()).is_config_error());
        assert!(TravisError::ConfigMissing("token".into()).is_config_error());
        assert!(!TravisError::SyncCancelled.is_config_error());
    }
}
