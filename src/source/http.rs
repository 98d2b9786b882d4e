//! HTTP deposit source

use super::traits::DepositSource;
use crate::config::SourceConfig;
use crate::error::{Error, FetchError, Result};
use crate::filter::PageQuery;
use crate::types::PageResponse;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Error body of the report API
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    code: String,
    #[serde(default)]
    message: Option<String>,
}

/// Deposit source backed by the paginated report endpoint of the API
///
/// Sends `GET <base_url>/<endpoint>?page=..&pageSize=..[&status=..][&startAt=..][&endAt=..][&search=..]`
/// and expects `{ "data": [...], "totalPages": n }` or `{ "code": "...", "message": "..." }`.
#[derive(Clone, Debug)]
pub struct HttpDepositSource {
    /// HTTP client with the configured timeout and user agent
    client: reqwest::Client,
    /// Fully resolved endpoint URL
    endpoint: Url,
}

impl HttpDepositSource {
    /// Create a source from configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base URL or endpoint cannot be parsed, and
    /// `Error::Network` if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut base = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url '{}': {}", config.base_url, e),
            key: Some("source.base_url".to_string()),
        })?;

        // Url::join replaces the last segment unless the base ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base.join(&config.endpoint).map_err(|e| Error::Config {
            message: format!("invalid endpoint '{}': {}", config.endpoint, e),
            key: Some("source.endpoint".to_string()),
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// The resolved endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DepositSource for HttpDepositSource {
    async fn fetch(&self, query: &PageQuery) -> std::result::Result<PageResponse, FetchError> {
        debug!(page = query.page, url = %self.endpoint, "Requesting deposit page");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // Error bodies may arrive with any status, including 200
        if let Ok(remote) = serde_json::from_slice::<RemoteErrorBody>(&body) {
            debug!(code = %remote.code, status = status.as_u16(), "Deposit source reported an error");
            return Err(FetchError::Remote {
                code: remote.code,
                message: remote.message,
            });
        }

        if status.is_success() {
            let page: PageResponse = serde_json::from_slice(&body)?;
            return Ok(page.normalized());
        }

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::not_found());
        }

        warn!(status = status.as_u16(), "Deposit source returned an unexpected status");
        Err(FetchError::HttpStatus {
            status: status.as_u16(),
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
