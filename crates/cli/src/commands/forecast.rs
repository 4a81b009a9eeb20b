use serde_json::{json, Value};
use weatherwear_core::recommendation::{classify, normalize};
use weatherwear_weather::{ForecastProvider, TemperatureLookup, WeatherApiClient};

use crate::commands::{build_runtime, load_config, CommandResult};

/// One provider lookup for `city`, classified the same way the HTTP API does it.
pub fn run(city: &str, date: Option<&str>) -> CommandResult {
    let city = city.trim();
    if city.is_empty() {
        return CommandResult::failure("forecast", "invalid_input", "City is required.", 7);
    }

    let raw_date = date.map(|date| Value::String(date.to_string()));
    let offset = match normalize(raw_date.as_ref()) {
        Ok(offset) => offset,
        Err(error) => {
            return CommandResult::failure("forecast", "invalid_input", error.to_string(), 7)
        }
    };

    let config = match load_config("forecast") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let client = match WeatherApiClient::from_config(&config.weather) {
        Ok(client) => client,
        Err(error) => {
            return CommandResult::failure("forecast", "weather_client", error.to_string(), 3)
        }
    };
    let runtime = match build_runtime("forecast") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    match runtime.block_on(client.average_temperature(city, offset)) {
        TemperatureLookup::Reading(temperature) => {
            let classification = classify(temperature);
            let message = format!(
                "{city} day {offset}: average {temperature}, {} weather, suggest {}",
                classification.descriptor.as_str(),
                classification.category.label()
            );
            let data = json!({
                "city": city,
                "day_offset": offset.get(),
                "average_celsius": temperature.as_celsius(),
                "is": classification.descriptor.as_str(),
                "category": classification.category.as_str(),
            });
            CommandResult::success_with_data("forecast", message, Some(data))
        }
        TemperatureLookup::NoData(reason) => CommandResult::failure(
            "forecast",
            "weather_unavailable",
            format!("Failed to retrieve temperature data. ({reason:?})"),
            8,
        ),
    }
}
