use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, warn};

use weatherwear_core::config::WeatherConfig;
use weatherwear_core::recommendation::DayOffset;

use crate::payload::ForecastResponse;
use crate::{ForecastProvider, NoDataReason, TemperatureLookup};

const USER_AGENT: &str = concat!("weatherwear/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum WeatherClientError {
    #[error("failed to build forecast HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Client for a weatherapi.com-compatible `forecast.json` endpoint.
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    language: String,
}

impl WeatherApiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(WeatherClientError::Build)?;

        Ok(Self { client, base_url: base_url.into(), api_key, language: language.into() })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherClientError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.language.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url.trim_end_matches('/'))
    }

    async fn fetch(&self, city: &str, offset: DayOffset) -> Result<ForecastResponse, NoDataReason> {
        let days = offset.get().to_string();
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("q", city),
                ("days", days.as_str()),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|error| {
                // The request URL carries the API key; strip it before logging.
                let error = error.without_url();
                warn!(
                    event_name = "weather.lookup.transport_failed",
                    city,
                    days = offset.get(),
                    timeout = error.is_timeout(),
                    error = %error,
                    "forecast request failed"
                );
                NoDataReason::Transport
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                event_name = "weather.lookup.status_rejected",
                city,
                days = offset.get(),
                status = status.as_u16(),
                "forecast provider returned a non-success status"
            );
            return Err(NoDataReason::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|error| {
            let error = error.without_url();
            warn!(
                event_name = "weather.lookup.body_failed",
                city,
                error = %error,
                "failed to read forecast response body"
            );
            NoDataReason::Transport
        })?;

        ForecastResponse::from_slice(&body).map_err(|reason| {
            warn!(
                event_name = "weather.lookup.malformed_payload",
                city,
                bytes = body.len(),
                "forecast response is not a forecast document"
            );
            reason
        })
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiClient {
    async fn average_temperature(&self, city: &str, offset: DayOffset) -> TemperatureLookup {
        let lookup = self
            .fetch(city, offset)
            .await
            .and_then(|payload| payload.average_for(offset))
            .map_or_else(TemperatureLookup::NoData, TemperatureLookup::Reading);

        match &lookup {
            TemperatureLookup::Reading(temperature) => debug!(
                event_name = "weather.lookup.completed",
                city,
                days = offset.get(),
                average = %temperature,
                "forecast lookup completed"
            ),
            TemperatureLookup::NoData(reason) => debug!(
                event_name = "weather.lookup.no_data",
                city,
                days = offset.get(),
                reason = ?reason,
                "forecast lookup produced no temperature"
            ),
        }

        lookup
    }
}

impl std::fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("language", &self.language)
            .finish()
    }
}
