use certidao_common::metrics::{METRIC_PREFIX, MetricRegistration};
use prometheus::{IntCounterVec, Opts, register_int_counter_vec};
use std::sync::OnceLock;

fn upstream_total() -> &'static MetricRegistration<IntCounterVec> {
    static METRIC: OnceLock<MetricRegistration<IntCounterVec>> = OnceLock::new();
    METRIC.get_or_init(|| {
        register_int_counter_vec!(
            Opts::new(
                format!("{METRIC_PREFIX}_relay_upstream_total"),
                "Outcome of submissions forwarded to the sheet script"
            ),
            &["outcome"]
        )
    })
}

/// `outcome` is one of `json`, `non_json` or `transport_error`.
pub fn inc_upstream_outcome(outcome: &str) {
    if let Ok(counter) = upstream_total() {
        counter.with_label_values(&[outcome]).inc();
    }
}
