use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Daily average temperature in degrees Celsius.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(f64);

impl Temperature {
    pub fn celsius(value: f64) -> Self {
        Self(value)
    }

    pub fn as_celsius(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherDescriptor {
    Cold,
    Warm,
    Hot,
}

impl WeatherDescriptor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }
}

/// Weather block of a recommendation response.
///
/// `date` echoes the request's date value as it was sent (string or number),
/// or `"today"` when the request omitted it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city: String,
    #[serde(rename = "is")]
    pub descriptor: WeatherDescriptor,
    pub date: Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Temperature, WeatherDescriptor, WeatherSummary};

    #[test]
    fn summary_serializes_descriptor_under_is() {
        let summary = WeatherSummary {
            city: "Marseille".to_string(),
            descriptor: WeatherDescriptor::Hot,
            date: json!("tomorrow"),
        };

        let value = serde_json::to_value(&summary).expect("serialize summary");
        assert_eq!(value, json!({"city": "Marseille", "is": "hot", "date": "tomorrow"}));
    }

    #[test]
    fn temperature_displays_one_decimal() {
        assert_eq!(Temperature::celsius(21.0).to_string(), "21.0°C");
    }
}
