//! Typed rows returned by search queries.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of a search response.
///
/// Only the resources this connector queries are modeled; unknown fields
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsRow {
    /// The `customer_user_access` resource, when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_user_access: Option<CustomerUserAccess>,
}

impl GoogleAdsRow {
    /// Creates a row carrying a user access entry.
    pub fn user_access(access: CustomerUserAccess) -> Self {
        Self {
            customer_user_access: Some(access),
        }
    }
}

/// A user's access to a customer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUserAccess {
    /// Numeric user id.
    #[serde(default, deserialize_with = "int64_opt")]
    pub user_id: Option<i64>,
    /// Email address of the user.
    #[serde(default)]
    pub email_address: Option<String>,
    /// Access role enum name, e.g. `ADMIN`.
    #[serde(default)]
    pub access_role: Option<String>,
}

/// Accepts int64 values encoded either as JSON numbers or strings.
fn int64_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Int64 {
        Number(i64),
        String(String),
    }

    match Option::<Int64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Int64::Number(n)) => Ok(Some(n)),
        Some(Int64::String(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
