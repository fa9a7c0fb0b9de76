//! Profile attributes attached to resources.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar profile attribute.
///
/// # Example
///
/// ```rust
/// use googleads_connector::ProfileValue;
///
/// let email: ProfileValue = "ana@example.com".into();
/// let id: ProfileValue = 1234_i64.into();
/// assert_eq!(email.as_str(), Some("ana@example.com"));
/// assert_eq!(id.as_i64(), Some(1234));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
    /// Boolean value.
    Bool(bool),

    /// Integer value (64-bit signed).
    Integer(i64),

    /// String value.
    String(String),
}

impl ProfileValue {
    /// Returns the boolean value if this is a Bool variant.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ProfileValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Integer variant.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ProfileValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string value if this is a String variant.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ProfileValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ProfileValue {
    fn from(value: bool) -> Self {
        ProfileValue::Bool(value)
    }
}

impl From<i64> for ProfileValue {
    fn from(value: i64) -> Self {
        ProfileValue::Integer(value)
    }
}

impl From<&str> for ProfileValue {
    fn from(value: &str) -> Self {
        ProfileValue::String(value.to_owned())
    }
}

impl From<String> for ProfileValue {
    fn from(value: String) -> Self {
        ProfileValue::String(value)
    }
}

impl fmt::Display for ProfileValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileValue::Bool(b) => write!(f, "{}", b),
            ProfileValue::Integer(i) => write!(f, "{}", i),
            ProfileValue::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Ordered map of profile attributes.
///
/// Keys are kept sorted so two resources built from the same upstream row
/// compare and serialize identically.
///
/// ```rust
/// use googleads_connector::Profile;
///
/// let profile = Profile::new()
///     .with("login", "ana@example.com")
///     .with("user_id", 1234_i64);
/// assert_eq!(profile.len(), 2);
/// assert_eq!(profile.get("user_id").and_then(|v| v.as_i64()), Some(1234));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    values: BTreeMap<String, ProfileValue>,
}

impl Profile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, replacing any previous value for the key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ProfileValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an attribute, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ProfileValue>,
    ) -> Option<ProfileValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&ProfileValue> {
        self.values.get(key)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the profile has no attributes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfileValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
