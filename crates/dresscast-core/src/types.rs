//! Core data types for forecast samples, period summaries, and outfits

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One hour of forecast data for the target day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlySample {
    /// Calendar day the sample belongs to (local time)
    pub date: NaiveDate,

    /// Hour of day, 0-23; out-of-range values are skipped by the aggregator
    pub hour: u8,

    /// Air temperature in °C
    pub temperature_c: f64,

    /// Apparent ("feels like") temperature in °C
    pub apparent_temperature_c: f64,

    /// Precipitation amount in mm
    pub precipitation_mm: f64,

    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
}

/// Fixed segmentation of the day used for summaries and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Daytime,
    Evening,
}

impl DayPeriod {
    /// All periods in report order
    pub const ALL: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Daytime, DayPeriod::Evening];

    /// Map an hour of day to its period; Evening wraps past midnight
    pub fn from_hour(hour: u8) -> Option<DayPeriod> {
        match hour {
            6..=9 => Some(DayPeriod::Morning),
            10..=17 => Some(DayPeriod::Daytime),
            0..=5 | 18..=23 => Some(DayPeriod::Evening),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Daytime => "Daytime",
            DayPeriod::Evening => "Evening",
        }
    }

    /// Hour range shown next to the label in reports
    pub fn hours_label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "06–10",
            DayPeriod::Daytime => "10–18",
            DayPeriod::Evening => "18–24 & 00–06",
        }
    }
}

/// Wind strength category derived from the peak wind speed in a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindCategory {
    Mild,
    Moderate,
    Strong,
}

impl WindCategory {
    pub fn label(&self) -> &'static str {
        match self {
            WindCategory::Mild => "mild",
            WindCategory::Moderate => "moderate",
            WindCategory::Strong => "strong",
        }
    }
}

/// Aggregated conditions for one period of the day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodConditions {
    /// Minimum air temperature (°C)
    pub temp_min: f64,

    /// Maximum air temperature (°C)
    pub temp_max: f64,

    /// Minimum feels-like temperature (°C)
    pub feels_min: f64,

    /// Maximum feels-like temperature (°C)
    pub feels_max: f64,

    /// Any hour exceeded the rain cutoff
    pub rain_expected: bool,

    /// Any hour exceeded the heavy-rain cutoff
    pub rain_heavy: bool,

    /// Category of the windiest hour
    pub wind_category: WindCategory,
}

/// Summary for one period; `conditions` is None when no samples landed in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    pub period: DayPeriod,
    pub conditions: Option<PeriodConditions>,
}

/// Min/max pair of temperatures (°C)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

/// Layered outfit recommendation for one period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutfitRecommendation {
    pub period: DayPeriod,

    /// Base layer, always present
    pub upper_layer: String,

    /// Optional warmth layer between base and outerwear
    pub mid_layer: Option<String>,

    /// Outerwear; None in warm weather
    pub outer_layer: Option<String>,

    /// Lower body garment, always present
    pub lower_body: String,

    /// Extra items (umbrella, hat, ...) in a fixed order
    pub accessories: Vec<String>,
}

/// Everything needed to render one day's report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReport {
    pub date: NaiveDate,

    /// Air temperature range across all in-range samples
    pub overall_temp: Option<TempRange>,

    /// Feels-like range across all in-range samples
    pub overall_feels: Option<TempRange>,

    /// One summary per period, Morning/Daytime/Evening order
    pub summaries: [PeriodSummary; 3],

    /// One recommendation per period, same order
    pub recommendations: [OutfitRecommendation; 3],
}
