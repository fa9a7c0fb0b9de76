//! Side annotations returned alongside syncer pages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key under which syncers record the Google Ads request id of the call
/// that produced a page.
pub const REQUEST_ID_ANNOTATION: &str = "google_ads_request_id";

/// Ordered bag of side information attached to a page.
///
/// ```rust
/// use googleads_connector::Annotations;
///
/// let mut annotations = Annotations::new();
/// annotations.insert("google_ads_request_id", "abc");
/// assert_eq!(annotations.get_str("google_ads_request_id"), Some("abc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations {
    values: BTreeMap<String, serde_json::Value>,
}

impl Annotations {
    /// Creates an empty annotation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an annotation, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Returns the value for a key if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Returns `true` if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of annotations.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}
