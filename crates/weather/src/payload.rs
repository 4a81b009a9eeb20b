use serde::Deserialize;

use weatherwear_core::domain::weather::Temperature;
use weatherwear_core::recommendation::DayOffset;

use crate::NoDataReason;

/// Subset of a `forecast.json` response that the lookup reads.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDay {
    pub date: Option<String>,
    pub day: Option<DaySummary>,
}

#[derive(Debug, Deserialize)]
pub struct DaySummary {
    pub avgtemp_c: Option<f64>,
}

impl ForecastResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, NoDataReason> {
        serde_json::from_slice(body).map_err(|_| NoDataReason::MalformedPayload)
    }

    /// Average of the `offset`-th day, counting today as day 1.
    pub fn average_for(&self, offset: DayOffset) -> Result<Temperature, NoDataReason> {
        let forecast = self.forecast.as_ref().ok_or(NoDataReason::MalformedPayload)?;
        let day =
            forecast.forecastday.get(offset.forecast_index()).ok_or(NoDataReason::MissingDay)?;

        day.day
            .as_ref()
            .and_then(|summary| summary.avgtemp_c)
            .filter(|celsius| celsius.is_finite())
            .map(Temperature::celsius)
            .ok_or(NoDataReason::MalformedPayload)
    }
}
