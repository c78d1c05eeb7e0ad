//! Forecast retrieval for the Dresscast pipeline
//!
//! Defines the narrow interface the pipeline pulls hourly samples through,
//! plus the Open-Meteo implementation used in production and a canned
//! source for tests and offline runs.

pub mod canned;
pub mod open_meteo;

pub use canned::*;
pub use open_meteo::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use dresscast_core::HourlySample;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Forecast API returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed forecast payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid endpoint URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Source of hourly forecast samples for a single day
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch all hourly samples for `date`
    async fn hourly_forecast(&self, date: NaiveDate) -> FetchResult<Vec<HourlySample>>;
}
