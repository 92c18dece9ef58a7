// Error handling for the Edge management API
// Every failure is surfaced to the caller; nothing here retries.

pub mod fault;

use thiserror::Error;

pub use fault::{describe_failure, parse_fault, EdgeFault};

/// Type alias for Edge results
pub type EdgeResult<T> = Result<T, EdgeError>;

#[derive(Debug, Error)]
pub enum EdgeError {
    /// Network, DNS or timeout failure, or an HTTP status the caller cannot
    /// interpret safely (e.g. a 500 while checking role existence).
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    #[error("Failed to create role {role} (HTTP {status}): {message}")]
    RoleCreation {
        role: String,
        status: u16,
        message: String,
    },

    #[error("Failed to add permissions on {path} to role {role} (HTTP {status}): {message}")]
    Permission {
        role: String,
        path: String,
        status: u16,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EdgeError {
    /// Create a transport error without an HTTP status
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a transport error for an HTTP status nobody expected
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Create an authentication error
    pub fn authentication(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status that caused the error, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            EdgeError::Transport { status, .. } | EdgeError::Authentication { status, .. } => *status,
            EdgeError::RoleCreation { status, .. } | EdgeError::Permission { status, .. } => Some(*status),
            EdgeError::Config { .. } | EdgeError::Decode { .. } => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EdgeError::Transport { .. } => ErrorCategory::Transport,
            EdgeError::Authentication { .. } => ErrorCategory::Auth,
            EdgeError::RoleCreation { .. } => ErrorCategory::RoleCreation,
            EdgeError::Permission { .. } => ErrorCategory::Permission,
            EdgeError::Config { .. } => ErrorCategory::Config,
            EdgeError::Decode { .. } => ErrorCategory::Decode,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            EdgeError::Transport { message, status: None, .. } => {
                message.contains("timeout") || message.contains("Timeout")
            }
            _ => false,
        }
    }

    /// Whether a caller-side retry has a chance of succeeding.
    ///
    /// Only transport failures qualify: those without any response, or with a
    /// 429/5xx status. Rejected credentials and conflicts never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            EdgeError::Transport { status: None, .. } => true,
            EdgeError::Transport { status: Some(code), .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    pub fn context(&self) -> String {
        match self {
            EdgeError::Transport { message, .. }
            | EdgeError::Authentication { message, .. }
            | EdgeError::RoleCreation { message, .. }
            | EdgeError::Permission { message, .. }
            | EdgeError::Config { message }
            | EdgeError::Decode { message, .. } => message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Transport,
    Auth,
    RoleCreation,
    Permission,
    Config,
    Decode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_only_for_transport_without_definite_answer() {
        assert!(EdgeError::transport("Connection failed: refused").is_retryable());
        assert!(EdgeError::unexpected_status(503, "unavailable").is_retryable());
        assert!(EdgeError::unexpected_status(429, "slow down").is_retryable());
        assert!(!EdgeError::unexpected_status(400, "bad").is_retryable());
        assert!(!EdgeError::authentication(Some(401), "nope").is_retryable());
    }

    #[test]
    fn status_is_reported_per_variant() {
        let err = EdgeError::RoleCreation {
            role: "temp_role".to_string(),
            status: 409,
            message: "exists".to_string(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.category(), ErrorCategory::RoleCreation);
        assert_eq!(EdgeError::config("missing").status(), None);
    }

    #[test]
    fn timeout_detection() {
        assert!(EdgeError::transport("Request timeout: deadline elapsed").is_timeout());
        assert!(!EdgeError::unexpected_status(504, "Gateway timeout").is_timeout());
    }
}
