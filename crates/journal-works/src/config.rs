//! Configuration for the journal works API.

use std::time::Duration;

/// Crossref API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Crossref REST API.
    pub const BASE_URL: &str = "https://api.crossref.org";

    /// Product token sent in the `User-Agent` header.
    pub const USER_AGENT: &str = concat!("journal-works/", env!("CARGO_PKG_VERSION"));

    /// Per-call request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Largest `rows` value Crossref accepts for a single page.
    pub const MAX_ROWS: u32 = 1000;

    /// Cursor value that starts a deep-paging walk.
    pub const INITIAL_CURSOR: &str = "*";

    /// Items returned when the caller does not say how many.
    pub const DEFAULT_MAX_ITEMS: i64 = 20;

    /// Maximum keepalive connections per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Crossref works filter vocabulary.
pub mod filters {
    /// Works published online on or after the given date.
    pub const FROM_ONLINE_PUB_DATE: &str = "from-online-pub-date";

    /// Filters whose value must be a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` date.
    pub const DATE_FILTERS: &[&str] = &[
        "from-accepted-date",
        "from-created-date",
        "from-deposit-date",
        "from-index-date",
        "from-issued-date",
        "from-online-pub-date",
        "from-posted-date",
        "from-print-pub-date",
        "from-pub-date",
        "from-update-date",
        "until-accepted-date",
        "until-created-date",
        "until-deposit-date",
        "until-index-date",
        "until-issued-date",
        "until-online-pub-date",
        "until-posted-date",
        "until-print-pub-date",
        "until-pub-date",
        "until-update-date",
    ];

    /// Other filters accepted on the works route.
    pub const VALUE_FILTERS: &[&str] = &[
        "has-abstract",
        "has-affiliation",
        "has-funder",
        "has-license",
        "has-orcid",
        "has-references",
        "is-update",
        "funder",
        "license.url",
        "member",
        "orcid",
        "prefix",
        "type",
    ];

    /// Returns true if `name` is a filter Crossref accepts on works.
    #[must_use]
    pub fn is_supported(name: &str) -> bool {
        DATE_FILTERS.contains(&name) || VALUE_FILTERS.contains(&name)
    }

    /// Returns true if `name` takes a date value.
    #[must_use]
    pub fn is_date_filter(name: &str) -> bool {
        DATE_FILTERS.contains(&name)
    }
}

/// Crossref works sort fields.
pub mod sorts {
    pub const SUPPORTED: &[&str] = &[
        "created",
        "deposited",
        "indexed",
        "is-referenced-by-count",
        "issued",
        "published",
        "published-online",
        "published-print",
        "references-count",
        "relevance",
        "score",
        "updated",
    ];
}

/// Remote client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the Crossref API (overridden for mock servers).
    pub base_url: String,

    /// Per-call request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Ceiling for the `rows` parameter of a single page.
    pub max_rows: u32,

    /// Transport retries for transient failures. Zero keeps upstream failures terminal.
    pub max_retries: u32,

    /// Product token for the `User-Agent` header.
    pub user_agent: String,
}

impl Config {
    /// Create a configuration pointing at the given Crossref base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_rows: api::MAX_ROWS,
            max_retries: 0,
            user_agent: api::USER_AGENT.to_string(),
        }
    }

    /// Create a test configuration with a custom URL for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            request_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(1),
            ..Self::new(base_url)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `CROSSREF_API_URL`, `CROSSREF_TIMEOUT_SECS` and `CROSSREF_MAX_RETRIES`.
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("CROSSREF_API_URL").unwrap_or_else(|_| api::BASE_URL.into());
        let mut config = Self::new(base_url);

        if let Ok(secs) = std::env::var("CROSSREF_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid CROSSREF_TIMEOUT_SECS '{secs}': {e}"))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Ok(retries) = std::env::var("CROSSREF_MAX_RETRIES") {
            config.max_retries = retries
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid CROSSREF_MAX_RETRIES '{retries}': {e}"))?;
        }

        Ok(config)
    }

    /// Page size for a walk that needs at most `wanted` items.
    #[must_use]
    pub fn page_size(&self, wanted: usize) -> u32 {
        let ceiling = self.max_rows.max(1);
        u32::try_from(wanted).unwrap_or(ceiling).clamp(1, ceiling)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, api::BASE_URL);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.max_rows, 1000);
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = Config::new("http://localhost:1234/");
        assert_eq!(config.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_page_size_bounds() {
        let config = Config::default();
        assert_eq!(config.page_size(2), 2);
        assert_eq!(config.page_size(0), 1);
        assert_eq!(config.page_size(5_000), 1000);
        assert_eq!(config.page_size(usize::MAX), 1000);
    }

    #[test]
    fn test_filters() {
        assert!(filters::is_supported(filters::FROM_ONLINE_PUB_DATE));
        assert!(filters::is_date_filter("until-pub-date"));
        assert!(filters::is_supported("type"));
        assert!(!filters::is_date_filter("type"));
        assert!(!filters::is_supported("from-moon-date"));
    }

    #[test]
    fn test_sorts() {
        assert!(sorts::SUPPORTED.contains(&"published"));
        assert!(!sorts::SUPPORTED.contains(&"title"));
    }
}
