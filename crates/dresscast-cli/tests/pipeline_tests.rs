//! End-to-end pipeline tests with substitute sources and notifiers

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use dresscast_cli::Pipeline;
use dresscast_core::{HourlySample, RuleTable, Thresholds};
use dresscast_fetch::{CannedForecast, FetchError, FetchResult, ForecastSource};
use dresscast_notify::{Notifier, NotifyResult};
use dresscast_store::SampleStore;

/// Captures delivered mail instead of sending it
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, subject: &str, body: &str, recipient: &str) -> NotifyResult<()> {
        self.sent.lock().unwrap().push((
            subject.to_string(),
            body.to_string(),
            recipient.to_string(),
        ));
        Ok(())
    }
}

/// Source whose fetch always fails
struct FailingSource;

#[async_trait]
impl ForecastSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn hourly_forecast(&self, _date: NaiveDate) -> FetchResult<Vec<HourlySample>> {
        Err(FetchError::MalformedPayload(
            "Response carries no hourly block".to_string(),
        ))
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 26).unwrap()
}

fn pipeline_with(source: Box<dyn ForecastSource>, store: SampleStore) -> Pipeline {
    Pipeline::new(
        source,
        store,
        Thresholds::default(),
        RuleTable::builtin().unwrap(),
    )
}

#[tokio::test]
async fn test_run_fetches_caches_and_delivers() {
    let date = test_date();
    let source = Box::new(CannedForecast::mild_day(date));
    let store = SampleStore::open_in_memory().unwrap();
    let mut pipeline = pipeline_with(source, store);
    let notifier = RecordingNotifier::default();

    pipeline
        .run(date, &notifier, "someone@example.org")
        .await
        .unwrap();

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);

    let (subject, body, recipient) = &sent[0];
    assert_eq!(subject, "Dresscast: Weather & Outfit Report for 2025-04-26");
    assert_eq!(recipient, "someone@example.org");
    assert!(body.starts_with("Hello from Dresscast!"));
    assert!(body.contains("Weather Summary for 2025-04-26"));
    assert!(body.contains("- Upper layer: Long-sleeve shirt or light sweater"));
    assert!(body.contains("- Rain: none expected"));
    assert!(body.trim_end().ends_with("Stay comfortable!"));
}

#[tokio::test]
async fn test_fetch_caches_full_day() {
    let date = test_date();
    let source = Box::new(CannedForecast::mild_day(date));
    let store = SampleStore::open_in_memory().unwrap();
    let mut pipeline = pipeline_with(source, store);

    let count = pipeline.fetch(date).await.unwrap();
    assert_eq!(count, 24);

    // A second fetch overwrites the same rows rather than duplicating them
    let count = pipeline.fetch(date).await.unwrap();
    assert_eq!(count, 24);

    let text = pipeline.report(date).unwrap();
    assert!(text.contains("- Morning (06–10):"));
}

#[tokio::test]
async fn test_failed_fetch_stops_run_before_delivery() {
    let date = test_date();
    let store = SampleStore::open_in_memory().unwrap();
    let mut pipeline = pipeline_with(Box::new(FailingSource), store);
    let notifier = RecordingNotifier::default();

    let result = pipeline.run(date, &notifier, "someone@example.org").await;

    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("Failed to fetch forecast"));
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_from_preloaded_cache_needs_no_source() {
    let date = test_date();
    let mut store = SampleStore::open_in_memory().unwrap();
    let samples: Vec<HourlySample> = (10..14)
        .map(|hour| HourlySample {
            date,
            hour,
            temperature_c: 27.0,
            apparent_temperature_c: 28.0,
            precipitation_mm: 0.0,
            wind_speed_kmh: 9.0,
        })
        .collect();
    store.upsert_samples(&samples).unwrap();

    let pipeline = pipeline_with(Box::new(FailingSource), store);
    let text = pipeline.report(date).unwrap();

    assert!(text.contains("- Daytime (10–18): 27.0–27.0°C"));
    assert!(text.contains("- Upper layer: T-shirt or short-sleeve shirt"));
    assert!(text.contains("- Accessories: Sunglasses and sunscreen"));
    // Periods with no cached hours fall back instead of failing
    assert!(text.contains("Morning (06–10) [insufficient data]"));
}

#[tokio::test]
async fn test_empty_cache_still_renders_report() {
    let date = test_date();
    let store = SampleStore::open_in_memory().unwrap();
    let pipeline = pipeline_with(Box::new(FailingSource), store);

    let text = pipeline.report(date).unwrap();
    assert!(text.contains("- Temperature range: no data"));
    assert!(text.contains("Evening (18–24 & 00–06) [insufficient data]"));
}
