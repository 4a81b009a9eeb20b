use serde_json::Value;

use super::date::{DateInput, DateKeyword, DayOffset};
use crate::domain::weather::{WeatherDescriptor, WeatherSummary};
use crate::errors::DomainError;

/// Validated form of a `POST /api/products` body.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherQuery {
    pub city: String,
    pub date: DateInput,
    /// Date value exactly as the caller sent it, `"today"` when omitted.
    pub date_echo: Value,
}

impl WeatherQuery {
    /// Reads `weather.city` and the top-level `date`. City is checked before date.
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        let city = payload
            .get("weather")
            .and_then(|weather| weather.get("city"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .ok_or(DomainError::MissingField { field: "city" })?;

        let raw_date = payload.get("date");
        let date = DateInput::parse(raw_date)?;
        let date_echo = match raw_date {
            None | Some(Value::Null) => Value::from(DateKeyword::Today.as_str()),
            Some(value) => value.clone(),
        };

        Ok(Self { city: city.to_string(), date, date_echo })
    }

    pub fn day_offset(&self) -> DayOffset {
        self.date.day_offset()
    }

    pub fn summary(&self, descriptor: WeatherDescriptor) -> WeatherSummary {
        WeatherSummary { city: self.city.clone(), descriptor, date: self.date_echo.clone() }
    }
}

pub fn decode_weather_query(body: &[u8]) -> Result<WeatherQuery, DomainError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|error| DomainError::MalformedInput { detail: error.to_string() })?;
    WeatherQuery::from_payload(&payload)
}
