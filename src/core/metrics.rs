use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_attempt_graded(score: i32, max_score: i32) {
    metrics::counter!("attempts_graded_total").increment(1);
    if max_score > 0 {
        metrics::histogram!("attempt_score_ratio").record(f64::from(score) / f64::from(max_score));
    }
}

pub(crate) fn record_attempt_rejected(reason: &'static str) {
    metrics::counter!("attempts_rejected_total", "reason" => reason).increment(1);
}
