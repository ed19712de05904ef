//! Crossref REST API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest, shared by every per-request client
//! - Optional retry middleware with exponential backoff
//! - Polite-pool etiquette (`mailto`) chosen per request
//! - Cursor-based deep paging over `/journals/{issn}/works`

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Envelope, WorkList, WorksPage};
use crate::works::{WorksQuery, WorksSource};

/// Crossref API client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct CrossrefClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// API base URL.
    base_url: Url,

    /// Product token for `User-Agent`.
    user_agent: String,

    /// Contact email for the polite pool.
    mailto: Option<String>,

    /// Bound on each call, from send to the last body byte.
    request_timeout: Duration,
}

impl CrossrefClient {
    /// Create an anonymous client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(500), Duration::from_secs(10))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
            user_agent: config.user_agent,
            mailto: None,
            request_timeout: config.request_timeout,
        })
    }

    /// A client for one request, identified by `mailto` when given.
    ///
    /// The connection pool is shared with `self`.
    #[must_use]
    pub fn with_mailto(&self, mailto: Option<&str>) -> Self {
        Self { mailto: mailto.map(str::to_string), ..self.clone() }
    }

    /// Contact email sent with requests, if any.
    #[must_use]
    pub fn mailto(&self) -> Option<&str> {
        self.mailto.as_deref()
    }

    /// Fetch one page of a journal's works.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn journal_works_page(
        &self,
        query: &WorksQuery,
        cursor: &str,
        rows: u32,
    ) -> ClientResult<WorksPage> {
        let mut params = query.params();
        params.push(("cursor".to_string(), cursor.to_string()));
        params.push(("rows".to_string(), rows.to_string()));

        let envelope: Envelope<WorkList> = self.get(&self.works_url(query.issn())?, &params).await?;
        Ok(envelope.message.into())
    }

    /// Count a journal's works matching `query` without fetching any.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn journal_works_count(&self, query: &WorksQuery) -> ClientResult<u64> {
        let mut params = query.params();
        params.push(("rows".to_string(), "0".to_string()));

        let envelope: Envelope<WorkList> = self.get(&self.works_url(query.issn())?, &params).await?;
        Ok(envelope.message.total_results)
    }

    /// `{base}/journals/{issn}/works`, with the ISSN percent-encoded as one segment.
    fn works_url(&self, issn: &str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["journals", issn, "works"]);
        Ok(url)
    }

    fn user_agent(&self) -> String {
        match self.mailto {
            Some(ref email) => format!("{} (mailto:{email})", self.user_agent),
            None => self.user_agent.clone(),
        }
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &Url, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut params = params.to_vec();
        if let Some(ref email) = self.mailto {
            params.push(("mailto".to_string(), email.clone()));
        }

        tracing::debug!(url = %url, ?params, "Crossref request");

        let call = async {
            let response = self
                .client
                .get(url.as_str())
                .header(USER_AGENT, self.user_agent())
                .query(&params)
                .send()
                .await?;

            let response = self.handle_response(response).await?;
            Ok::<_, ClientError>(response.text().await?)
        };

        let body = tokio::time::timeout(self.request_timeout, call)
            .await
            .map_err(|_| ClientError::Timeout(self.request_timeout))??;

        serde_json::from_str(&body).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(status = status.as_u16(), url = %response.url(), "Crossref returned an error status");

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl WorksSource for CrossrefClient {
    async fn fetch_page(&self, query: &WorksQuery, cursor: &str, rows: u32) -> ClientResult<WorksPage> {
        self.journal_works_page(query, cursor, rows).await
    }

    async fn count(&self, query: &WorksQuery) -> ClientResult<u64> {
        self.journal_works_count(query).await
    }
}

impl std::fmt::Debug for CrossrefClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossrefClient")
            .field("base_url", &self.base_url.as_str())
            .field("polite", &self.mailto.is_some())
            .finish()
    }
}
