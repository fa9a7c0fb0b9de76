//! Page tokens and pages.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Annotations;

/// Opaque pagination cursor.
///
/// The empty token means "start from the first page". Tokens returned by the
/// upstream are passed back verbatim to fetch the following page.
///
/// ```rust
/// use googleads_connector::PageToken;
///
/// assert!(PageToken::start().is_start());
/// assert!(!PageToken::new("CAE=").is_start());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Creates a token from an upstream cursor.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token requesting the first page.
    pub fn start() -> Self {
        Self::default()
    }

    /// Returns `true` if this token requests the first page.
    #[inline]
    pub fn is_start(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw cursor.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the cursor to send upstream, `None` for the first page.
    pub fn as_upstream(&self) -> Option<&str> {
        (!self.is_start()).then_some(self.0.as_str())
    }

    /// Normalizes an upstream "next page" cursor: absent or empty means
    /// there are no more pages.
    pub fn next_from_upstream(token: Option<String>) -> Option<Self> {
        token.filter(|t| !t.is_empty()).map(Self)
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for PageToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// One page of syncer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The items of this page.
    pub items: Vec<T>,
    /// Token for the next page; `None` when enumeration is complete.
    pub next_page_token: Option<PageToken>,
    /// Side information about the call that produced the page.
    pub annotations: Annotations,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(items: Vec<T>, next_page_token: Option<PageToken>) -> Self {
        Self {
            items,
            next_page_token,
            annotations: Annotations::new(),
        }
    }

    /// Creates a final page holding `items`.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Creates an empty final page.
    pub fn empty() -> Self {
        Self::last(Vec::new())
    }

    /// Attaches annotations.
    #[must_use]
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns `true` if there are no further pages.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
