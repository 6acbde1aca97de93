//! HTTP 指标
//!
//! relay 与 console 共用的请求计数、耗时直方图以及 `/metrics` 导出。
//! 各进程自己的业务计数器注册在同一个默认 registry 中，一并导出。

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, TextEncoder,
    register_histogram_vec, register_int_counter_vec,
};
use std::sync::OnceLock;
use std::time::Instant;

/// 所有指标名的公共前缀
pub const METRIC_PREFIX: &str = "certidao";

/// 注册失败时只记录日志，请求处理不受影响
pub type MetricRegistration<T> = std::result::Result<T, prometheus::Error>;

fn http_requests_total() -> &'static MetricRegistration<IntCounterVec> {
    static METRIC: OnceLock<MetricRegistration<IntCounterVec>> = OnceLock::new();
    METRIC.get_or_init(|| {
        register_int_counter_vec!(
            Opts::new(format!("{METRIC_PREFIX}_http_requests_total"), "HTTP 请求总数"),
            &["method", "path", "status"]
        )
        .inspect_err(|err| tracing::warn!(error = %err, "metric registration failed"))
    })
}

fn http_request_duration_seconds() -> &'static MetricRegistration<HistogramVec> {
    static METRIC: OnceLock<MetricRegistration<HistogramVec>> = OnceLock::new();
    METRIC.get_or_init(|| {
        let opts = HistogramOpts::new(
            format!("{METRIC_PREFIX}_http_request_duration_seconds"),
            "HTTP 请求耗时（秒）",
        );
        register_histogram_vec!(opts, &["method", "path"])
            .inspect_err(|err| tracing::warn!(error = %err, "metric registration failed"))
    })
}

/// 按匹配到的路由模板记录请求数与耗时，需要通过 `route_layer` 挂载
pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let method = req.method().as_str().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "<unmatched>".to_string());

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    if let Ok(counter) = http_requests_total() {
        counter.with_label_values(&[&method, &path, &status]).inc();
    }
    if let Ok(histogram) = http_request_duration_seconds() {
        histogram.with_label_values(&[&method, &path]).observe(elapsed);
    }

    response
}

/// 以 Prometheus 文本格式导出默认 registry
pub fn render_metrics() -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(_) => {
            let mut resp = Response::new(Body::from(buffer));
            resp.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_str(encoder.format_type())
                    .unwrap_or_else(|_| HeaderValue::from_static("text/plain; version=0.0.4")),
            );
            resp
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Metrics encoding failed").into_response()
        }
    }
}
