use std::sync::Arc;

use tracing::{info, warn};
use weatherwear_core::domain::product::Product;
use weatherwear_core::domain::weather::{Temperature, WeatherSummary};
use weatherwear_core::errors::ApplicationError;
use weatherwear_core::recommendation::{classify, WeatherQuery};
use weatherwear_db::ProductRepository;
use weatherwear_weather::{ForecastProvider, TemperatureLookup};

#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub products: Vec<Product>,
    pub weather: WeatherSummary,
    pub temperature: Temperature,
}

/// Looks up the forecast, buckets it, and loads the matching products.
#[derive(Clone)]
pub struct RecommendationService {
    products: Arc<dyn ProductRepository>,
    forecasts: Arc<dyn ForecastProvider>,
}

impl RecommendationService {
    pub fn new(products: Arc<dyn ProductRepository>, forecasts: Arc<dyn ForecastProvider>) -> Self {
        Self { products, forecasts }
    }

    pub async fn recommend(
        &self,
        query: &WeatherQuery,
        correlation_id: &str,
    ) -> Result<Recommendation, ApplicationError> {
        let offset = query.day_offset();

        let temperature = match self.forecasts.average_temperature(&query.city, offset).await {
            TemperatureLookup::Reading(temperature) => temperature,
            TemperatureLookup::NoData(reason) => {
                warn!(
                    event_name = "recommendation.weather.unavailable",
                    correlation_id,
                    city = %query.city,
                    days = offset.get(),
                    reason = ?reason,
                    "no temperature for requested day"
                );
                return Err(ApplicationError::UpstreamUnavailable(format!(
                    "{} day {offset}: {reason:?}",
                    query.city
                )));
            }
        };

        let classification = classify(temperature);
        let products =
            self.products.find_by_category(classification.category).await.map_err(|error| {
                warn!(
                    event_name = "recommendation.products.query_failed",
                    correlation_id,
                    category = %classification.category,
                    error = %error,
                    "product lookup failed"
                );
                ApplicationError::Persistence(error.to_string())
            })?;

        info!(
            event_name = "recommendation.completed",
            correlation_id,
            city = %query.city,
            days = offset.get(),
            average = %temperature,
            category = %classification.category,
            product_count = products.len(),
            "recommendation computed"
        );

        Ok(Recommendation {
            products,
            weather: query.summary(classification.descriptor),
            temperature,
        })
    }
}
