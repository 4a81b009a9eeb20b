//! Forecast provider seam and the weatherapi.com-compatible HTTP client behind it.

pub mod client;
pub mod memory;
pub mod payload;

use async_trait::async_trait;
use weatherwear_core::domain::weather::Temperature;
use weatherwear_core::recommendation::DayOffset;

pub use client::{WeatherApiClient, WeatherClientError};
pub use memory::FixedForecastProvider;

/// Why a lookup produced no temperature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoDataReason {
    /// The request never produced a response (connect failure, timeout, body read).
    Transport,
    /// The provider answered with a non-success status.
    Status(u16),
    /// The body was not a forecast document, or the requested day had no average.
    MalformedPayload,
    /// The forecast held fewer days than requested.
    MissingDay,
}

/// Outcome of a single forecast lookup. Failures are values, not errors.
#[derive(Clone, Debug, PartialEq)]
pub enum TemperatureLookup {
    Reading(Temperature),
    NoData(NoDataReason),
}

impl TemperatureLookup {
    pub fn reading(self) -> Option<Temperature> {
        match self {
            Self::Reading(temperature) => Some(temperature),
            Self::NoData(_) => None,
        }
    }
}

/// Source of daily average temperatures for a city.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Average temperature of day `offset` (1 = today) at `city`. One outbound call at most.
    async fn average_temperature(&self, city: &str, offset: DayOffset) -> TemperatureLookup;
}
