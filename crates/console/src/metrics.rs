use certidao_common::metrics::{METRIC_PREFIX, MetricRegistration};
use prometheus::{IntCounterVec, Opts, register_int_counter_vec};
use std::sync::OnceLock;

fn operations_total() -> &'static MetricRegistration<IntCounterVec> {
    static METRIC: OnceLock<MetricRegistration<IntCounterVec>> = OnceLock::new();
    METRIC.get_or_init(|| {
        register_int_counter_vec!(
            Opts::new(
                format!("{METRIC_PREFIX}_console_operations_total"),
                "List loads and form submissions by outcome"
            ),
            &["operation", "outcome"]
        )
    })
}

pub fn record_outcome(operation: &str, ok: bool) {
    if let Ok(counter) = operations_total() {
        let outcome = if ok { "ok" } else { "error" };
        counter.with_label_values(&[operation, outcome]).inc();
    }
}
