//! Main error type for the connector.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use super::ErrorKind;

/// The error type returned by every syncer, data source and configuration
/// operation in this crate.
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching / retry decisions)
/// ├── message: String          (stage context + description)
/// ├── request_id: Option       (Google Ads request id, when known)
/// ├── retry_after: Option      (rate limit delay hint)
/// └── source: Option           (underlying cause)
/// ```
///
/// Call sites describe where a failure happened with [`Error::context`]:
///
/// ```rust
/// use googleads_connector::{Error, ErrorKind};
///
/// let err = Error::unauthorized("token expired").context("creating customer client");
/// assert_eq!(err.kind(), ErrorKind::Unauthorized);
/// assert_eq!(err.to_string(), "unauthorized: creating customer client: token expired");
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    request_id: Option<String>,
    retry_after: Option<Duration>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use googleads_connector::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::InvalidArgument, "page token is malformed");
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            request_id: None,
            retry_after: None,
            source: None,
        }
    }

    /// Creates an error from a kind with a default message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Unauthorized => "authentication failed",
            ErrorKind::Forbidden => "permission denied",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::RateLimited => "rate limit exceeded",
            ErrorKind::Unavailable => "service unavailable",
            ErrorKind::Timeout => "deadline exceeded",
            ErrorKind::Internal => "internal error",
            ErrorKind::Cancelled => "operation cancelled",
            ErrorKind::Connection => "connection failed",
            ErrorKind::Protocol => "protocol error",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Mapping => "row could not be mapped",
            ErrorKind::InvalidResponse => "invalid response",
            ErrorKind::Transport => "transport error",
            ErrorKind::Unknown => "unknown error",
        };
        Self::new(kind, message)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message, including any stage context.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the Google Ads request id, if the upstream reported one.
    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the recommended retry delay for rate limit errors.
    #[inline]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Returns `true` if this error is generally safe to retry.
    ///
    /// Equivalent to `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the request ID for this error.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the retry-after duration for this error.
    #[must_use]
    pub fn with_retry_after(mut self, duration: Duration) -> Self {
        self.retry_after = Some(duration);
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Wraps this error with a description of the stage that failed.
    ///
    /// The kind, request id and retry hint are preserved; the original
    /// error becomes the [`source`](StdError::source) of the returned one.
    #[must_use]
    pub fn context(self, stage: impl Into<Cow<'static, str>>) -> Self {
        let message = format!("{}: {}", stage.into(), self.message);
        Self {
            kind: self.kind,
            message: message.into(),
            request_id: self.request_id.clone(),
            retry_after: self.retry_after,
            source: Some(Box::new(self)),
        }
    }

    // Convenience constructors for common error types

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after: Option<Duration>) -> Self {
        let mut err = Self::from_kind(ErrorKind::RateLimited);
        err.retry_after = retry_after;
        err
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Creates a cancelled error.
    pub fn cancelled() -> Self {
        Self::from_kind(ErrorKind::Cancelled)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a protocol error.
    pub fn protocol(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Protocol, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a mapping error.
    pub fn mapping(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Mapping, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(ref request_id) = self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::Configuration,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Configuration,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => ErrorKind::Connection,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Internal,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::InvalidResponse, format!("JSON error: {}", err)).with_source(err)
    }
}

#[cfg(feature = "rest")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection
        } else if err.is_decode() {
            ErrorKind::InvalidResponse
        } else if err.is_builder() || err.is_request() {
            ErrorKind::InvalidArgument
        } else {
            ErrorKind::Transport
        };
        Error::new(kind, format!("HTTP error: {}", err)).with_source(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::InvalidArgument, "test message");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("test message"));
        assert!(err.request_id().is_none());
        assert!(err.retry_after().is_none());
    }

    #[test]
    fn test_error_from_kind() {
        let err = Error::from_kind(ErrorKind::Unauthorized);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(err.to_string().contains("authentication failed"));
    }

    #[test]
    fn test_context_keeps_kind_and_chains_source() {
        let err = Error::unavailable("backend overloaded")
            .with_request_id("req_1")
            .context("listing accounts");

        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(err.message(), "listing accounts: backend overloaded");
        assert_eq!(err.request_id(), Some("req_1"));

        let source = err.source().unwrap();
        assert!(source.to_string().contains("backend overloaded"));
        assert!(!source.to_string().contains("listing accounts"));
    }

    #[test]
    fn test_nested_context() {
        let err = Error::mapping("row 3 has no email address")
            .context("mapping user row")
            .context("listing users");
        assert_eq!(
            err.to_string(),
            "mapping error: listing users: mapping user row: row 3 has no email address"
        );
    }

    #[test]
    fn test_error_with_retry_after() {
        let err = Error::rate_limited(Some(Duration::from_secs(30)));
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert!(err.is_retriable());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Error::unauthorized("t").kind(), ErrorKind::Unauthorized);
        assert_eq!(Error::invalid_argument("t").kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::unavailable("t").kind(), ErrorKind::Unavailable);
        assert_eq!(Error::timeout("t").kind(), ErrorKind::Timeout);
        assert_eq!(Error::internal("t").kind(), ErrorKind::Internal);
        assert_eq!(Error::cancelled().kind(), ErrorKind::Cancelled);
        assert_eq!(Error::connection("t").kind(), ErrorKind::Connection);
        assert_eq!(Error::protocol("t").kind(), ErrorKind::Protocol);
        assert_eq!(Error::configuration("t").kind(), ErrorKind::Configuration);
        assert_eq!(Error::mapping("t").kind(), ErrorKind::Mapping);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_display_format() {
        let err = Error::new(ErrorKind::NotFound, "customer not found").with_request_id("req_xyz789");
        let display = err.to_string();
        assert!(display.contains("not found"));
        assert!(display.contains("customer not found"));
        assert!(display.contains("req_xyz789"));
    }
}
