//! Canned forecast source for tests and offline runs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{FetchResult, ForecastSource};
use dresscast_core::HourlySample;

/// Serves a fixed set of samples, filtered to the requested day
pub struct CannedForecast {
    samples: Vec<HourlySample>,
}

impl CannedForecast {
    pub fn new(samples: Vec<HourlySample>) -> Self {
        Self { samples }
    }

    /// Synthetic mild day: 24 dry hours with a gentle afternoon peak
    pub fn mild_day(date: NaiveDate) -> Self {
        let samples = (0u8..24)
            .map(|hour| {
                let swing = 4.0 * (f64::from(hour) * std::f64::consts::PI / 24.0).sin();
                HourlySample {
                    date,
                    hour,
                    temperature_c: 15.0 + swing,
                    apparent_temperature_c: 13.5 + swing,
                    precipitation_mm: 0.0,
                    wind_speed_kmh: 8.0,
                }
            })
            .collect();
        Self { samples }
    }
}

#[async_trait]
impl ForecastSource for CannedForecast {
    fn name(&self) -> &str {
        "canned"
    }

    async fn hourly_forecast(&self, date: NaiveDate) -> FetchResult<Vec<HourlySample>> {
        Ok(self
            .samples
            .iter()
            .filter(|s| s.date == date)
            .cloned()
            .collect())
    }
}
