//! Ordered decision table mapping period conditions to clothing layers

use crate::types::{DayPeriod, OutfitRecommendation, PeriodConditions, PeriodSummary, WindCategory};

/// Feels-like temperature used to pick layers when a period has no data
const FALLBACK_TEMP_C: f64 = 17.0;

/// Rule table construction error
#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("Rule table is empty")]
    Empty,

    #[error("Rule {0} is unreachable: lower bounds must strictly decrease")]
    Unreachable(usize),

    #[error("Last rule must have no lower bound so every temperature maps to a band")]
    NoCatchAll,
}

/// One temperature band and the garments it selects
///
/// A band covers `[min_c, previous row's min_c)`; a value exactly on a
/// bound belongs to the band whose lower bound it is. `min_c: None` marks
/// the coldest, unbounded row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitRule {
    pub min_c: Option<f64>,
    pub upper_layer: &'static str,
    pub mid_layer: Option<&'static str>,
    pub outer_layer: Option<&'static str>,
    /// Outer variant substituted when the period's wind is strong
    pub windproof_outer: Option<&'static str>,
    pub lower_body: &'static str,
}

/// Validated decision table, rows ordered warmest first
///
/// Evaluation walks top to bottom and the first matching row wins. Values
/// beyond either end of the table (including NaN) take the nearest end row,
/// so lookup is total.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<OutfitRule>,
}

impl RuleTable {
    /// Validate and build a table
    ///
    /// Rows must be ordered warmest first with strictly decreasing lower
    /// bounds, and the last row must be unbounded below.
    pub fn new(rules: Vec<OutfitRule>) -> Result<Self, RuleTableError> {
        if rules.is_empty() {
            return Err(RuleTableError::Empty);
        }
        if rules[rules.len() - 1].min_c.is_some() {
            return Err(RuleTableError::NoCatchAll);
        }

        let mut prev = f64::INFINITY;
        for (idx, rule) in rules.iter().enumerate() {
            match rule.min_c {
                Some(min) if min < prev => prev = min,
                Some(_) => return Err(RuleTableError::Unreachable(idx)),
                None if idx + 1 == rules.len() => {}
                None => return Err(RuleTableError::Unreachable(idx + 1)),
            }
        }

        Ok(Self { rules })
    }

    /// The standard clothing bands
    ///
    /// Returns a Result so callers validate at startup like any other table.
    pub fn builtin() -> Result<Self, RuleTableError> {
        Self::new(vec![
            OutfitRule {
                min_c: Some(30.0),
                upper_layer: "Light, breathable t-shirt or tank top",
                mid_layer: None,
                outer_layer: None,
                windproof_outer: None,
                lower_body: "Shorts/skirt, breathable pants",
            },
            OutfitRule {
                min_c: Some(25.0),
                upper_layer: "T-shirt or short-sleeve shirt",
                mid_layer: None,
                outer_layer: None,
                windproof_outer: None,
                lower_body: "Shorts/skirt, breathable pants",
            },
            OutfitRule {
                min_c: Some(20.0),
                upper_layer: "T-shirt or light long-sleeve shirt",
                mid_layer: None,
                outer_layer: Some("Light cardigan or thin jacket"),
                windproof_outer: Some("Light cardigan or thin jacket (wind resistant preferred)"),
                lower_body: "Shorts/skirt, or light pants",
            },
            OutfitRule {
                min_c: Some(15.0),
                upper_layer: "Long-sleeve shirt or light sweater",
                mid_layer: None,
                outer_layer: Some("Light jacket"),
                windproof_outer: Some("Light jacket with wind protection"),
                lower_body: "Light pants or jeans",
            },
            OutfitRule {
                min_c: Some(10.0),
                upper_layer: "Sweater or light thermal top",
                mid_layer: None,
                outer_layer: Some("Medium-weight jacket"),
                windproof_outer: Some("Medium-weight jacket with good wind protection"),
                lower_body: "Jeans or any thick pants with a thermal inner",
            },
            OutfitRule {
                min_c: Some(5.0),
                upper_layer: "Thermal top",
                mid_layer: Some("Sweater for layering"),
                outer_layer: Some("Heavy jacket or coat, multiple layers advisable"),
                windproof_outer: None,
                lower_body: "Jeans or any thick pants with a thermal inner",
            },
            OutfitRule {
                min_c: None,
                upper_layer: "Thermal top",
                mid_layer: Some("Thick sweater for layering"),
                outer_layer: Some(
                    "Heavy winter coat with proper insulation, multiple layers advisable",
                ),
                windproof_outer: None,
                lower_body: "Warm pants or thermal layer under pants",
            },
        ])
    }

    /// Recommend an outfit for one period summary
    ///
    /// Upper and mid layers follow the period's maximum temperature; outer
    /// layer and lower body follow its minimum feels-like temperature.
    /// A period without data gets the moderate fallback and no accessories.
    pub fn recommend(&self, summary: &PeriodSummary) -> OutfitRecommendation {
        let Some(conditions) = &summary.conditions else {
            return self.fallback(summary.period);
        };

        let upper_row = self.row_for(conditions.temp_max);
        let outer_row = self.row_for(conditions.feels_min);

        let strong_wind = conditions.wind_category == WindCategory::Strong;
        let outer_layer = match (strong_wind, outer_row.windproof_outer) {
            (true, Some(windproof)) => Some(windproof.to_string()),
            _ => outer_row.outer_layer.map(str::to_string),
        };

        OutfitRecommendation {
            period: summary.period,
            upper_layer: upper_row.upper_layer.to_string(),
            mid_layer: upper_row.mid_layer.map(str::to_string),
            outer_layer,
            lower_body: outer_row.lower_body.to_string(),
            accessories: accessories_for(conditions),
        }
    }

    /// First row whose band contains `value`
    fn row_for(&self, value: f64) -> &OutfitRule {
        self.rules
            .iter()
            .find(|rule| rule.min_c.map_or(true, |min| value >= min))
            .unwrap_or(&self.rules[self.rules.len() - 1])
    }

    fn fallback(&self, period: DayPeriod) -> OutfitRecommendation {
        let row = self.row_for(FALLBACK_TEMP_C);
        OutfitRecommendation {
            period,
            upper_layer: row.upper_layer.to_string(),
            mid_layer: row.mid_layer.map(str::to_string),
            outer_layer: row.outer_layer.map(str::to_string),
            lower_body: row.lower_body.to_string(),
            accessories: Vec::new(),
        }
    }
}

/// Accessory list for a period, in fixed report order
fn accessories_for(conditions: &PeriodConditions) -> Vec<String> {
    let mut accessories = Vec::new();

    if conditions.rain_expected {
        if conditions.rain_heavy {
            accessories.push("Waterproof rain jacket and umbrella".to_string());
        } else {
            accessories.push("Umbrella or light raincoat".to_string());
        }
    }
    if conditions.feels_min < 10.0 {
        accessories.push("Hat".to_string());
    }
    if conditions.feels_min < 5.0 {
        accessories.push("Gloves".to_string());
    }
    if conditions.feels_min < 0.0 {
        accessories.push("Scarf".to_string());
    }
    if conditions.temp_max > 25.0 && !conditions.rain_expected {
        accessories.push("Sunglasses and sunscreen".to_string());
    }
    if conditions.wind_category == WindCategory::Strong {
        accessories.push("Windbreaker".to_string());
    }

    accessories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(temp_max: f64, feels_min: f64, rain: bool, wind: WindCategory) -> PeriodSummary {
        PeriodSummary {
            period: DayPeriod::Daytime,
            conditions: Some(PeriodConditions {
                temp_min: temp_max - 3.0,
                temp_max,
                feels_min,
                feels_max: feels_min + 3.0,
                rain_expected: rain,
                rain_heavy: false,
                wind_category: wind,
            }),
        }
    }

    fn table() -> RuleTable {
        RuleTable::builtin().unwrap()
    }

    // ordinal weight of the builtin outer layers, lightest first
    fn outer_weight(outer: Option<&str>) -> usize {
        match outer {
            None => 0,
            Some(s) if s.starts_with("Light cardigan") => 1,
            Some(s) if s.starts_with("Light jacket") => 2,
            Some(s) if s.starts_with("Medium-weight jacket") => 3,
            Some(s) if s.starts_with("Heavy jacket") => 4,
            Some(s) if s.starts_with("Heavy winter coat") => 5,
            Some(s) => panic!("unknown outer layer: {s}"),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            RuleTable::new(Vec::new()),
            Err(RuleTableError::Empty)
        ));
    }

    #[test]
    fn test_missing_catch_all_rejected() {
        let rules = vec![OutfitRule {
            min_c: Some(10.0),
            upper_layer: "Shirt",
            mid_layer: None,
            outer_layer: None,
            windproof_outer: None,
            lower_body: "Pants",
        }];
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleTableError::NoCatchAll)
        ));
    }

    #[test]
    fn test_non_decreasing_bounds_rejected() {
        let row = |min_c| OutfitRule {
            min_c,
            upper_layer: "Shirt",
            mid_layer: None,
            outer_layer: None,
            windproof_outer: None,
            lower_body: "Pants",
        };
        let result = RuleTable::new(vec![row(Some(10.0)), row(Some(20.0)), row(None)]);
        assert!(matches!(result, Err(RuleTableError::Unreachable(1))));
    }

    #[test]
    fn test_builtin_table_is_valid() {
        assert!(RuleTable::builtin().is_ok());
    }

    #[test]
    fn test_upper_layer_follows_temp_max() {
        let t = table();
        let rec = t.recommend(&summary(32.0, 26.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "Light, breathable t-shirt or tank top");

        let rec = t.recommend(&summary(22.0, 18.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "T-shirt or light long-sleeve shirt");

        let rec = t.recommend(&summary(12.0, 8.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "Sweater or light thermal top");
    }

    #[test]
    fn test_outer_and_lower_follow_feels_min() {
        let t = table();
        let rec = t.recommend(&summary(22.0, 16.0, false, WindCategory::Mild));
        assert_eq!(rec.outer_layer.as_deref(), Some("Light jacket"));
        assert_eq!(rec.lower_body, "Light pants or jeans");

        let rec = t.recommend(&summary(28.0, 26.0, false, WindCategory::Mild));
        assert_eq!(rec.outer_layer, None);
        assert_eq!(rec.lower_body, "Shorts/skirt, breathable pants");
    }

    #[test]
    fn test_boundary_value_takes_band_it_opens() {
        let t = table();
        // 20.0 sits on the 20/25 bound and belongs to the band starting at 20
        let rec = t.recommend(&summary(20.0, 20.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "T-shirt or light long-sleeve shirt");
        assert_eq!(
            rec.outer_layer.as_deref(),
            Some("Light cardigan or thin jacket")
        );

        let rec = t.recommend(&summary(15.0, 15.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "Long-sleeve shirt or light sweater");
        assert_eq!(rec.outer_layer.as_deref(), Some("Light jacket"));
    }

    #[test]
    fn test_extreme_values_clamp_to_end_bands() {
        let t = table();
        let rec = t.recommend(&summary(55.0, 52.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "Light, breathable t-shirt or tank top");

        let rec = t.recommend(&summary(-45.0, -48.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "Thermal top");
        assert_eq!(rec.mid_layer.as_deref(), Some("Thick sweater for layering"));
        assert_eq!(rec.lower_body, "Warm pants or thermal layer under pants");
    }

    #[test]
    fn test_nan_takes_catch_all() {
        let t = table();
        let rec = t.recommend(&summary(f64::NAN, f64::NAN, false, WindCategory::Mild));
        assert_eq!(rec.lower_body, "Warm pants or thermal layer under pants");
    }

    #[test]
    fn test_cold_bands_add_mid_layer() {
        let t = table();
        let rec = t.recommend(&summary(7.0, 6.0, false, WindCategory::Mild));
        assert_eq!(rec.upper_layer, "Thermal top");
        assert_eq!(rec.mid_layer.as_deref(), Some("Sweater for layering"));

        let rec = t.recommend(&summary(18.0, 16.0, false, WindCategory::Mild));
        assert_eq!(rec.mid_layer, None);
    }

    #[test]
    fn test_strong_wind_upgrades_outer_and_adds_windbreaker() {
        let t = table();
        let rec = t.recommend(&summary(18.0, 16.0, false, WindCategory::Strong));
        assert_eq!(
            rec.outer_layer.as_deref(),
            Some("Light jacket with wind protection")
        );
        assert!(rec.accessories.contains(&"Windbreaker".to_string()));
    }

    #[test]
    fn test_moderate_wind_changes_nothing() {
        let t = table();
        let calm = t.recommend(&summary(18.0, 16.0, false, WindCategory::Mild));
        let moderate = t.recommend(&summary(18.0, 16.0, false, WindCategory::Moderate));
        assert_eq!(calm, moderate);
    }

    #[test]
    fn test_strong_wind_in_deep_cold_keeps_heavy_coat() {
        let t = table();
        let rec = t.recommend(&summary(8.0, 6.0, false, WindCategory::Strong));
        // no windproof variant below 10°C, the heavy coat already covers it
        assert_eq!(
            rec.outer_layer.as_deref(),
            Some("Heavy jacket or coat, multiple layers advisable")
        );
        assert!(rec.accessories.contains(&"Windbreaker".to_string()));
    }

    #[test]
    fn test_rain_accessory() {
        let t = table();
        let rec = t.recommend(&summary(18.0, 16.0, true, WindCategory::Mild));
        assert_eq!(rec.accessories, vec!["Umbrella or light raincoat"]);
    }

    #[test]
    fn test_heavy_rain_upgrades_accessory() {
        let t = table();
        let mut s = summary(18.0, 16.0, true, WindCategory::Mild);
        if let Some(c) = s.conditions.as_mut() {
            c.rain_heavy = true;
        }
        let rec = t.recommend(&s);
        assert_eq!(rec.accessories, vec!["Waterproof rain jacket and umbrella"]);
    }

    #[test]
    fn test_cold_accessories_accumulate_in_order() {
        let t = table();
        let rec = t.recommend(&summary(3.0, -2.0, true, WindCategory::Strong));
        assert_eq!(
            rec.accessories,
            vec![
                "Umbrella or light raincoat",
                "Hat",
                "Gloves",
                "Scarf",
                "Windbreaker"
            ]
        );
    }

    #[test]
    fn test_sunny_warm_day_gets_sun_protection() {
        let t = table();
        let rec = t.recommend(&summary(28.0, 24.0, false, WindCategory::Mild));
        assert_eq!(rec.accessories, vec!["Sunglasses and sunscreen"]);

        // rain suppresses the sun accessory
        let rec = t.recommend(&summary(28.0, 24.0, true, WindCategory::Mild));
        assert_eq!(rec.accessories, vec!["Umbrella or light raincoat"]);
    }

    #[test]
    fn test_fallback_for_missing_period() {
        let t = table();
        let rec = t.recommend(&PeriodSummary {
            period: DayPeriod::Evening,
            conditions: None,
        });
        assert_eq!(rec.period, DayPeriod::Evening);
        assert_eq!(rec.upper_layer, "Long-sleeve shirt or light sweater");
        assert_eq!(rec.outer_layer.as_deref(), Some("Light jacket"));
        assert_eq!(rec.lower_body, "Light pants or jeans");
        assert!(rec.accessories.is_empty());
    }

    #[test]
    fn test_outer_layer_monotonic_in_cold() {
        let t = table();
        let feels = [27.0, 22.0, 17.0, 12.0, 7.0, -3.0];
        let mut last_weight = 0;
        for feels_min in feels {
            let rec = t.recommend(&summary(feels_min + 4.0, feels_min, false, WindCategory::Mild));
            let weight = outer_weight(rec.outer_layer.as_deref());
            assert!(
                weight >= last_weight,
                "outer got lighter at feels_min {feels_min}"
            );
            last_weight = weight;
        }
    }
}
