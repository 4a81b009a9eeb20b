use async_trait::async_trait;
use tokio::sync::Mutex;

use weatherwear_core::recommendation::DayOffset;

use crate::{ForecastProvider, TemperatureLookup};

/// Provider that answers every lookup with the same outcome and records the calls it saw.
pub struct FixedForecastProvider {
    outcome: TemperatureLookup,
    calls: Mutex<Vec<(String, DayOffset)>>,
}

impl FixedForecastProvider {
    pub fn new(outcome: TemperatureLookup) -> Self {
        Self { outcome, calls: Mutex::new(Vec::new()) }
    }

    pub async fn calls(&self) -> Vec<(String, DayOffset)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ForecastProvider for FixedForecastProvider {
    async fn average_temperature(&self, city: &str, offset: DayOffset) -> TemperatureLookup {
        self.calls.lock().await.push((city.to_string(), offset));
        self.outcome.clone()
    }
}
