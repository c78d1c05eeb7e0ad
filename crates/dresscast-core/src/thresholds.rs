//! Tunable cutoffs used by the aggregator

use crate::types::WindCategory;
use serde::{Deserialize, Serialize};

/// Cutoff values for rain and wind classification
///
/// Injected into the aggregator rather than hard-coded so tests can probe
/// boundary behavior; the binary fills unset values from these defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    /// Precipitation above this (mm) marks an hour as rainy
    pub rain_mm: f64,

    /// Precipitation above this (mm) upgrades the rain accessory
    pub heavy_rain_mm: f64,

    /// Wind below this (km/h) is Mild
    pub wind_moderate_kmh: f64,

    /// Wind below this (km/h) is Moderate, at or above it is Strong
    pub wind_strong_kmh: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rain_mm: 0.2,
            heavy_rain_mm: 5.0,
            wind_moderate_kmh: 15.0,
            wind_strong_kmh: 30.0,
        }
    }
}

impl Thresholds {
    /// Classify a wind speed
    pub fn wind_category(&self, wind_speed_kmh: f64) -> WindCategory {
        if wind_speed_kmh < self.wind_moderate_kmh {
            WindCategory::Mild
        } else if wind_speed_kmh < self.wind_strong_kmh {
            WindCategory::Moderate
        } else {
            WindCategory::Strong
        }
    }

    /// True when an hour's precipitation counts as rain
    pub fn is_rainy(&self, precipitation_mm: f64) -> bool {
        precipitation_mm > self.rain_mm
    }

    /// True when an hour's precipitation counts as heavy rain
    pub fn is_heavy_rain(&self, precipitation_mm: f64) -> bool {
        precipitation_mm > self.heavy_rain_mm
    }
}
