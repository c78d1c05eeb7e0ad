//! The pure sample-to-report pipeline

use chrono::NaiveDate;

use crate::aggregate::{aggregate, overall_ranges};
use crate::rules::RuleTable;
use crate::thresholds::Thresholds;
use crate::types::{DailyReport, HourlySample};

/// Build the daily report for one day's samples
///
/// Aggregation and recommendation run as one sequential pass. The function
/// is total: data-quality problems degrade to `no data` summaries and
/// fallback recommendations, never to errors. Fetching, caching, and
/// delivery live in the surrounding crates.
pub fn build_report(
    date: NaiveDate,
    samples: &[HourlySample],
    thresholds: &Thresholds,
    rules: &RuleTable,
) -> DailyReport {
    let summaries = aggregate(samples, thresholds);
    let recommendations = summaries.clone().map(|summary| rules.recommend(&summary));
    let (overall_temp, overall_feels) = overall_ranges(samples);

    DailyReport {
        date,
        overall_temp,
        overall_feels,
        summaries,
        recommendations,
    }
}
