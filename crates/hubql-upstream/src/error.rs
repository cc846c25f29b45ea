//! Error types for outbound fetches.

/// Errors that can occur while fetching from the upstream API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("GET {url} failed: {message}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// Description of the network failure.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("GET {url} returned a body that is not valid JSON: {message}")]
    Decode {
        /// The URL that was requested.
        url: String,
        /// Description of the decode failure.
        message: String,
    },

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client error: {message}")]
    Client {
        /// Description of the client error.
        message: String,
    },
}

/// Coarse classification of an [`UpstreamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The fetch itself failed (status or network).
    Fetch,
    /// The fetch succeeded but the payload could not be decoded.
    Decode,
    /// Local misconfiguration.
    Configuration,
}

impl UpstreamError {
    /// Creates a new `Status` error.
    #[must_use]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a new `Transport` error.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new `Client` error.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Status { .. } | Self::Transport { .. } => ErrorCategory::Fetch,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::Client { .. } => ErrorCategory::Configuration,
        }
    }

    /// Returns the HTTP status code if the upstream answered with one.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the upstream answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }
}
