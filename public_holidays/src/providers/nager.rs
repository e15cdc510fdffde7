use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::PublicHoliday,
    providers::{
        ApiSnafu, ClientBuildSnafu, DecodeSnafu, HolidayProvider, ProviderError, RequestSnafu,
    },
};

/// Public endpoint, `{base}/{year}/{country}`.
pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3/PublicHolidays";

/// Per-request timeout used by [`NagerProvider::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the Nager.Date public holiday API.
#[derive(Debug, Clone)]
pub struct NagerProvider {
    client: Client,
    base_url: String,
}

impl NagerProvider {
    /// Provider against the public endpoint.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Provider against a custom endpoint (mirrors, test servers).
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url(&self, country: &str, year: i32) -> String {
        format!("{}/{year}/{country}", self.base_url)
    }
}

#[async_trait]
impl HolidayProvider for NagerProvider {
    async fn fetch_holidays(
        &self,
        country: &str,
        year: i32,
    ) -> Result<Vec<PublicHoliday>, ProviderError> {
        let url = self.url(country, year);
        debug!(%url, "fetching public holidays");

        let response = self.client.get(&url).send().await.context(RequestSnafu)?;
        let status = response.status();

        // The API signals "no holidays known" with an empty 204.
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu {
                status: status.as_u16(),
                message,
            }
            .fail();
        }

        let body = response.text().await.context(RequestSnafu)?;
        serde_json::from_str(&body).context(DecodeSnafu { origin: url })
    }
}
