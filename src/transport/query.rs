//! Structured Google Ads Query Language (GAQL) statements.

use std::fmt;

/// An equality condition in a `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    field: String,
    value: String,
}

impl Condition {
    /// Returns the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the compared value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A `SELECT ... FROM ... [WHERE ...]` query.
///
/// Kept structured so data sources can inspect it; [`Display`](fmt::Display)
/// renders the GAQL text sent upstream.
///
/// ```rust
/// use googleads_connector::transport::Query;
///
/// let query = Query::select(["customer_user_access.user_id"])
///     .from("customer_user_access")
///     .where_eq("customer_user_access.access_role", "ADMIN");
///
/// assert_eq!(
///     query.to_string(),
///     r#"SELECT customer_user_access.user_id FROM customer_user_access WHERE customer_user_access.access_role = "ADMIN""#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    fields: Vec<String>,
    resource: String,
    conditions: Vec<Condition>,
}

impl Query {
    /// Starts a query selecting `fields`.
    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            resource: String::new(),
            conditions: Vec::new(),
        }
    }

    /// Sets the resource the query reads from.
    #[must_use]
    pub fn from(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Adds a `field = "value"` condition. Conditions are joined with `AND`.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Returns the selected fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the resource.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the value compared against `field`, if the query filters on it.
    pub fn condition(&self, field: &str) -> Option<&str> {
        self.conditions
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.value.as_str())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.fields.join(", "), self.resource)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            write!(
                f,
                " {} {} = \"{}\"",
                keyword,
                condition.field,
                condition.value.replace('"', "\\\"")
            )?;
        }
        Ok(())
    }
}
