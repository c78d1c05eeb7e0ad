//! Plain-text rendering of a daily report

use crate::types::{
    DailyReport, OutfitRecommendation, PeriodSummary, TempRange, WindCategory,
};

/// Render a daily report as the canonical text block
///
/// Pure templating over already-computed data, deterministic for identical
/// input. Golden tests pin the exact shape.
pub fn render_report(report: &DailyReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Weather Summary for {}\n",
        report.date.format("%Y-%m-%d")
    ));
    out.push_str(&range_line("Temperature range", report.overall_temp));
    out.push_str(&range_line("Feels like", report.overall_feels));
    for summary in &report.summaries {
        out.push_str(&summary_line(summary));
    }
    out.push_str(&rain_line(&report.summaries));
    out.push_str(&wind_line(&report.summaries));

    for (summary, recommendation) in report.summaries.iter().zip(&report.recommendations) {
        out.push('\n');
        out.push_str(&recommendation_block(summary, recommendation));
    }

    out
}

fn range_line(label: &str, range: Option<TempRange>) -> String {
    match range {
        Some(r) => format!("- {}: {:.1}°C to {:.1}°C\n", label, r.min, r.max),
        None => format!("- {label}: no data\n"),
    }
}

fn summary_line(summary: &PeriodSummary) -> String {
    let period = summary.period;
    match &summary.conditions {
        Some(c) => format!(
            "- {} ({}): {:.1}–{:.1}°C\n",
            period.label(),
            period.hours_label(),
            c.temp_min,
            c.temp_max
        ),
        None => format!("- {} ({}): no data\n", period.label(), period.hours_label()),
    }
}

fn rain_line(summaries: &[PeriodSummary; 3]) -> String {
    if summaries.iter().all(|s| s.conditions.is_none()) {
        return "- Rain: no data\n".to_string();
    }
    let rainy = summaries
        .iter()
        .filter_map(|s| s.conditions.as_ref())
        .any(|c| c.rain_expected);
    if rainy {
        "- Rain: ☔ expected\n".to_string()
    } else {
        "- Rain: none expected\n".to_string()
    }
}

fn wind_line(summaries: &[PeriodSummary; 3]) -> String {
    let worst = summaries
        .iter()
        .filter_map(|s| s.conditions.as_ref())
        .map(|c| c.wind_category)
        .max();
    match worst {
        None => "- Wind: no data\n".to_string(),
        Some(WindCategory::Strong) => "- Wind: 💨 strong\n".to_string(),
        Some(WindCategory::Moderate) => "- Wind: 🌬 moderate\n".to_string(),
        Some(WindCategory::Mild) => "- Wind: 🍃 mild\n".to_string(),
    }
}

fn recommendation_block(summary: &PeriodSummary, rec: &OutfitRecommendation) -> String {
    let period = rec.period;
    let mut title = format!("{} ({})", period.label(), period.hours_label());
    if summary.conditions.is_none() {
        title.push_str(" [insufficient data]");
    }

    let mid = rec.mid_layer.as_deref().unwrap_or("None");
    let outer = rec.outer_layer.as_deref().unwrap_or("None");
    let accessories = if rec.accessories.is_empty() {
        "None".to_string()
    } else {
        rec.accessories.join(", ")
    };

    format!(
        "{title}\n- Upper layer: {}\n- Mid layer: {mid}\n- Outer layer: {outer}\n- Lower body: {}\n- Accessories: {accessories}\n",
        rec.upper_layer, rec.lower_body
    )
}
