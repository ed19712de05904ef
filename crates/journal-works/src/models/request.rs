//! Request models for the journal works endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::api;
use crate::error::QueryError;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Value Crossref expects in the `order` parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(QueryError::UnknownOrder(other.to_string())),
        }
    }
}

/// Query string of `GET /api/journals/{issn}/works`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorksParams {
    /// Free-text search within the journal.
    #[serde(default)]
    pub q: Option<String>,

    /// Only works published online from this year on.
    #[serde(default)]
    pub filter_from_year: Option<i32>,

    /// Sort field, e.g. "published".
    #[serde(default)]
    pub sort: Option<String>,

    /// Sort direction, `asc` or `desc`. Checked when the query is built.
    #[serde(default)]
    pub order: Option<String>,

    /// Maximum number of items to return (0 for none).
    #[serde(default = "default_max_items")]
    pub max_items: i64,

    /// Include the number of matching works.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub count: bool,

    /// Contact email for the Crossref polite pool.
    #[serde(default)]
    pub mailto: Option<String>,
}

fn default_max_items() -> i64 {
    api::DEFAULT_MAX_ITEMS
}

/// Parse a query-string boolean the way form frameworks usually do.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("value could not be parsed to a boolean: '{raw}'")))
}

/// A fully parsed journal works request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalWorksRequest {
    /// Journal ISSN, used as-is in the remote path.
    pub issn: String,
    pub query_text: Option<String>,
    pub from_year: Option<i32>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub max_items: i64,
    pub include_count: bool,
    pub contact_email: Option<String>,
}

impl JournalWorksRequest {
    /// Request for `issn` with every option at its default.
    #[must_use]
    pub fn new(issn: impl Into<String>) -> Self {
        Self {
            issn: issn.into(),
            query_text: None,
            from_year: None,
            sort_field: None,
            sort_order: None,
            max_items: api::DEFAULT_MAX_ITEMS,
            include_count: false,
            contact_email: None,
        }
    }

    /// Combine the path ISSN with the query string.
    ///
    /// Empty strings and a zero year count as absent.
    #[must_use]
    pub fn from_params(issn: impl Into<String>, params: WorksParams) -> Self {
        Self {
            issn: issn.into(),
            query_text: non_empty(params.q),
            from_year: params.filter_from_year.filter(|year| *year != 0),
            sort_field: non_empty(params.sort),
            sort_order: non_empty(params.order),
            max_items: params.max_items,
            include_count: params.count,
            contact_email: non_empty(params.mailto),
        }
    }

    /// Number of items to collect. Negative maxima collect nothing.
    #[must_use]
    pub fn item_limit(&self) -> usize {
        usize::try_from(self.max_items).unwrap_or(0)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!("sideways".parse::<SortOrder>(), Err(QueryError::UnknownOrder("sideways".into())));
        assert!("".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_from_params_drops_empty_strings() {
        let params = WorksParams {
            q: Some(String::new()),
            sort: Some(String::new()),
            order: Some(String::new()),
            mailto: Some("me@example.org".into()),
            max_items: 5,
            ..WorksParams::default()
        };
        let req = JournalWorksRequest::from_params("1234-5678", params);
        assert!(req.query_text.is_none());
        assert!(req.sort_field.is_none());
        assert!(req.sort_order.is_none());
        assert_eq!(req.contact_email.as_deref(), Some("me@example.org"));
        assert_eq!(req.max_items, 5);
    }

    #[test]
    fn test_from_params_keeps_whitespace_text() {
        let params = WorksParams { q: Some("  ".into()), ..WorksParams::default() };
        let req = JournalWorksRequest::from_params("1234-5678", params);
        assert_eq!(req.query_text.as_deref(), Some("  "));
    }

    #[test]
    fn test_from_params_zero_year_is_absent() {
        let params = WorksParams { filter_from_year: Some(0), ..WorksParams::default() };
        assert!(JournalWorksRequest::from_params("1234-5678", params).from_year.is_none());

        let params = WorksParams { filter_from_year: Some(-5), ..WorksParams::default() };
        assert_eq!(JournalWorksRequest::from_params("1234-5678", params).from_year, Some(-5));
    }

    #[test]
    fn test_item_limit() {
        let mut req = JournalWorksRequest::new("1234-5678");
        assert_eq!(req.item_limit(), 20);
        req.max_items = 0;
        assert_eq!(req.item_limit(), 0);
        req.max_items = -3;
        assert_eq!(req.item_limit(), 0);
    }
}
