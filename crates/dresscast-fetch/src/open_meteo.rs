//! Open-Meteo hourly forecast client

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::{FetchError, FetchResult, ForecastSource};
use dresscast_core::HourlySample;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const HOURLY_FIELDS: &str = "temperature_2m,apparent_temperature,precipitation,wind_speed_10m";
const FORECAST_MODEL: &str = "icon_seamless";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Geographic point the forecast is requested for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone passed to the API; sample hours are local to this zone
    pub timezone: String,
}

impl Default for Location {
    /// Berlin, the deployment's fixed location
    fn default() -> Self {
        Self {
            latitude: 52.5244,
            longitude: 13.4105,
            timezone: "Europe/Berlin".to_string(),
        }
    }
}

/// Client for the Open-Meteo forecast endpoint
pub struct OpenMeteoClient {
    http: Client,
    base_url: Url,
    location: Location,
}

impl OpenMeteoClient {
    pub fn new(location: Location) -> FetchResult<Self> {
        Self::with_base_url(location, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (tests use this)
    pub fn with_base_url(location: Location, base_url: &str) -> FetchResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            location,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    fn name(&self) -> &str {
        "open-meteo"
    }

    async fn hourly_forecast(&self, date: NaiveDate) -> FetchResult<Vec<HourlySample>> {
        let day = date.format("%Y-%m-%d").to_string();
        info!(
            %day,
            latitude = self.location.latitude,
            longitude = self.location.longitude,
            "fetching hourly forecast"
        );

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("latitude", self.location.latitude.to_string()),
                ("longitude", self.location.longitude.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("models", FORECAST_MODEL.to_string()),
                ("timezone", self.location.timezone.clone()),
                ("start_date", day.clone()),
                ("end_date", day),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Api {
                status,
                body: truncate_body(&body),
            });
        }

        let payload: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;
        samples_from_payload(date, payload)
    }
}

/// Convert the columnar API payload into per-hour samples
///
/// Hours missing a temperature or apparent temperature are skipped with a
/// warning; missing precipitation or wind default to 0.
fn samples_from_payload(
    date: NaiveDate,
    payload: ForecastResponse,
) -> FetchResult<Vec<HourlySample>> {
    let hourly = payload
        .hourly
        .ok_or_else(|| FetchError::MalformedPayload("missing hourly block".to_string()))?;
    if hourly.time.is_empty() {
        return Err(FetchError::MalformedPayload(
            "hourly block has no timestamps".to_string(),
        ));
    }

    let mut samples = Vec::with_capacity(hourly.time.len());
    for (idx, stamp) in hourly.time.iter().enumerate() {
        let Some((sample_date, hour)) = parse_stamp(stamp) else {
            warn!(%stamp, "skipping unparseable timestamp");
            continue;
        };
        if sample_date != date {
            debug!(%stamp, "skipping sample outside requested day");
            continue;
        }
        let temperature = value_at(&hourly.temperature_2m, idx);
        let apparent = value_at(&hourly.apparent_temperature, idx);
        let (Some(temperature_c), Some(apparent_temperature_c)) = (temperature, apparent) else {
            warn!(%stamp, "skipping hour with missing temperature");
            continue;
        };

        samples.push(HourlySample {
            date: sample_date,
            hour,
            temperature_c,
            apparent_temperature_c,
            precipitation_mm: value_at(&hourly.precipitation, idx).unwrap_or(0.0),
            wind_speed_kmh: value_at(&hourly.wind_speed_10m, idx).unwrap_or(0.0),
        });
    }

    debug!(count = samples.len(), "parsed hourly samples");
    Ok(samples)
}

fn value_at(values: &[Option<f64>], idx: usize) -> Option<f64> {
    values.get(idx).copied().flatten()
}

/// Open-Meteo local timestamps look like "2025-04-26T07:00"
fn parse_stamp(stamp: &str) -> Option<(NaiveDate, u8)> {
    let dt = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M").ok()?;
    Some((dt.date(), dt.hour() as u8))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut: String = body.chars().take(MAX).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
}
