//! Reduction of hourly samples into per-period summaries

use crate::thresholds::Thresholds;
use crate::types::{DayPeriod, HourlySample, PeriodConditions, PeriodSummary, TempRange};

/// Reduce hourly samples into one summary per day period
///
/// Always returns exactly three summaries in Morning, Daytime, Evening
/// order. Input order does not matter. Samples with an hour outside 0-23
/// are skipped; a period that receives no samples gets `conditions: None`.
pub fn aggregate(samples: &[HourlySample], thresholds: &Thresholds) -> [PeriodSummary; 3] {
    DayPeriod::ALL.map(|period| {
        let bucket = samples
            .iter()
            .filter(|s| DayPeriod::from_hour(s.hour) == Some(period));
        PeriodSummary {
            period,
            conditions: summarize_bucket(bucket, thresholds),
        }
    })
}

/// Air and feels-like temperature ranges across all in-range samples
pub fn overall_ranges(samples: &[HourlySample]) -> (Option<TempRange>, Option<TempRange>) {
    let mut temp: Option<TempRange> = None;
    let mut feels: Option<TempRange> = None;

    for sample in samples.iter().filter(|s| s.hour <= 23) {
        extend(&mut temp, sample.temperature_c);
        extend(&mut feels, sample.apparent_temperature_c);
    }

    (temp, feels)
}

fn extend(range: &mut Option<TempRange>, value: f64) {
    match range {
        None => {
            *range = Some(TempRange {
                min: value,
                max: value,
            })
        }
        Some(r) => {
            r.min = r.min.min(value);
            r.max = r.max.max(value);
        }
    }
}

fn summarize_bucket<'a>(
    bucket: impl Iterator<Item = &'a HourlySample>,
    thresholds: &Thresholds,
) -> Option<PeriodConditions> {
    let mut conditions: Option<PeriodConditions> = None;

    for sample in bucket {
        match conditions.as_mut() {
            None => {
                conditions = Some(PeriodConditions {
                    temp_min: sample.temperature_c,
                    temp_max: sample.temperature_c,
                    feels_min: sample.apparent_temperature_c,
                    feels_max: sample.apparent_temperature_c,
                    rain_expected: thresholds.is_rainy(sample.precipitation_mm),
                    rain_heavy: thresholds.is_heavy_rain(sample.precipitation_mm),
                    wind_category: thresholds.wind_category(sample.wind_speed_kmh),
                });
            }
            Some(c) => {
                c.temp_min = c.temp_min.min(sample.temperature_c);
                c.temp_max = c.temp_max.max(sample.temperature_c);
                c.feels_min = c.feels_min.min(sample.apparent_temperature_c);
                c.feels_max = c.feels_max.max(sample.apparent_temperature_c);
                c.rain_expected |= thresholds.is_rainy(sample.precipitation_mm);
                c.rain_heavy |= thresholds.is_heavy_rain(sample.precipitation_mm);
                c.wind_category = c
                    .wind_category
                    .max(thresholds.wind_category(sample.wind_speed_kmh));
            }
        }
    }

    conditions
}
