//! Error types for the connector.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//! The connector never retries or swallows errors: client construction,
//! iteration and mapping failures are wrapped with the stage that failed
//! and handed to the caller, which owns retry and abort decisions.
//!
//! ```rust
//! use googleads_connector::{Error, ErrorKind};
//!
//! fn should_retry(err: &Error) -> bool {
//!     err.kind().is_retriable()
//! }
//!
//! assert!(!should_retry(&Error::mapping("missing email")));
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for connector operations.
pub type Result<T> = std::result::Result<T, Error>;
