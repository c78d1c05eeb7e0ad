//! Fetch, report, and send orchestration

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, instrument, warn};

use dresscast_core::{build_report, render_report, RuleTable, Thresholds};
use dresscast_fetch::ForecastSource;
use dresscast_notify::{subject_for, wrap_report, Notifier};
use dresscast_store::SampleStore;

/// End-to-end pipeline: forecast source in, cached samples, mailed report out
pub struct Pipeline {
    source: Box<dyn ForecastSource>,
    store: SampleStore,
    thresholds: Thresholds,
    rules: RuleTable,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn ForecastSource>,
        store: SampleStore,
        thresholds: Thresholds,
        rules: RuleTable,
    ) -> Self {
        Self {
            source,
            store,
            thresholds,
            rules,
        }
    }

    /// Fetch the hourly forecast for a day and cache it, returning the sample count
    #[instrument(skip(self))]
    pub async fn fetch(&mut self, date: NaiveDate) -> Result<usize> {
        info!("Fetching forecast for {} from {}", date, self.source.name());
        let samples = self
            .source
            .hourly_forecast(date)
            .await
            .context("Failed to fetch forecast")?;
        if samples.is_empty() {
            warn!("Forecast for {} returned no samples", date);
        }
        self.store
            .upsert_samples(&samples)
            .context("Failed to cache samples")?;
        Ok(samples.len())
    }

    /// Render the daily report from cached samples
    #[instrument(skip(self))]
    pub fn report(&self, date: NaiveDate) -> Result<String> {
        let samples = self
            .store
            .load_day(date)
            .context("Failed to load cached samples")?;
        if samples.is_empty() {
            warn!(
                "No cached samples for {}, report will carry fallbacks",
                date
            );
        }
        let report = build_report(date, &samples, &self.thresholds, &self.rules);
        Ok(render_report(&report))
    }

    /// Render the report from the cache and deliver it
    pub async fn send(
        &self,
        date: NaiveDate,
        notifier: &dyn Notifier,
        recipient: &str,
    ) -> Result<()> {
        let body = self.report(date)?;
        self.deliver(date, &body, notifier, recipient).await
    }

    /// Run the whole pipeline for a day
    pub async fn run(
        &mut self,
        date: NaiveDate,
        notifier: &dyn Notifier,
        recipient: &str,
    ) -> Result<()> {
        let started = Instant::now();
        info!("Starting Dresscast pipeline for {}", date);

        info!("Step 1: Fetching weather data");
        let count = self.fetch(date).await?;
        info!("Weather data fetched and cached: {} samples", count);

        info!("Step 2: Generating outfit recommendation");
        let body = self.report(date)?;

        info!("Step 3: Sending notification");
        self.deliver(date, &body, notifier, recipient).await?;

        info!(
            "Pipeline completed successfully in {:.2}s",
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }

    async fn deliver(
        &self,
        date: NaiveDate,
        body: &str,
        notifier: &dyn Notifier,
        recipient: &str,
    ) -> Result<()> {
        let subject = subject_for(date);
        let message = wrap_report(body);
        notifier
            .deliver(&subject, &message, recipient)
            .await
            .context("Failed to deliver report")
    }
}
