//! Error types for feedkit
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The controller's state machine does not distinguish individual errors;
//! it only sees the coarse [`ErrorKind`] obtained via [`Error::kind`].

use thiserror::Error;

/// Coarse error classification driving the pagination state machine.
///
/// Every failure a page fetch can produce collapses into one of these four
/// kinds. The UI collaborator may render different copy per kind, but the
/// controller treats them identically: all lead to `Errored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request did not complete within its timeout budget
    Timeout,
    /// No usable response (connection refused, cancelled, HTTP error status)
    Transport,
    /// A response arrived but its body could not be parsed into the
    /// expected shape
    Decode,
    /// A well-formed response reported `success: false`
    ApplicationFailure,
}

/// The main error type for feedkit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Network Errors
    // ============================================================================
    /// Connection or protocol failure from the underlying client
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The response status code
        status: u16,
        /// The response body, best effort
        body: String,
    },

    /// The request did not complete within its timeout budget
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// The budget that expired
        timeout_ms: u64,
    },

    /// The request's cancellation token fired
    #[error("Request cancelled")]
    Cancelled,

    /// A URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    /// A response body that is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A JSON body that does not match the expected envelope shape
    #[error("Failed to decode response: {message}")]
    Decode {
        /// What was wrong with the body
        message: String,
    },

    /// A well-formed envelope without the expected collection
    #[error("Response is missing collection '{collection_key}'")]
    MissingCollection {
        /// The key that was expected to hold the items
        collection_key: String,
    },

    // ============================================================================
    // Application Errors
    // ============================================================================
    /// A transport-level success whose envelope says `success: false`
    #[error("Server reported failure for {resource}")]
    AppFailure {
        /// The resource the request targeted
        resource: String,
    },

    // ============================================================================
    // Usage Errors
    // ============================================================================
    /// The caller asked for something the API cannot do
    #[error("Configuration error: {message}")]
    Config {
        /// What was misused
        message: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// A wrapped error with added context
    #[error("{0}")]
    Other(String),

    /// Any other error
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an application failure error
    pub fn app_failure(resource: impl Into<String>) -> Self {
        Self::AppFailure {
            resource: resource.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify this error for the pagination state machine.
    ///
    /// Cancellation counts as `Transport`: the caller abandoned the request,
    /// so from the state machine's perspective no response exists.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Cancelled
            | Error::InvalidUrl(_) => ErrorKind::Transport,
            Error::JsonParse(_) | Error::Decode { .. } | Error::MissingCollection { .. } => {
                ErrorKind::Decode
            }
            Error::AppFailure { .. } => ErrorKind::ApplicationFailure,
            // Usage and generic errors reach the controller only through a
            // failed fetch, where transport is the least wrong bucket.
            Error::Config { .. } | Error::Other(_) | Error::Anyhow(_) => ErrorKind::Transport,
        }
    }
}

/// Result type alias for feedkit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
