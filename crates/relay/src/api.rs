use crate::metrics;
use crate::state::AppState;
use crate::upstream;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use certidao_common::error::CertidaoError;
use certidao_common::metrics::metrics_middleware;
use serde_json::{Value as JsonValue, json};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

type ApiResult<T> = std::result::Result<T, CertidaoError>;

const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

pub fn router(state: AppState) -> axum::Router {
    let certidao = post(submit_certidao)
        .options(preflight)
        .fallback(method_not_allowed)
        .layer(middleware::map_response(with_cors_headers));

    axum::Router::new()
        .route("/api/certidao", certidao)
        .route("/healthz", get(healthz))
        .route("/metrics", get(render_metrics))
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn submit_certidao(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    let certidao = extract_certidao(&body).ok_or(CertidaoError::MissingPayload)?;

    let submission_id = Uuid::new_v4();
    let outcome =
        upstream::forward_submission(&state.client, &state.script_write_url, &certidao)
            .await
            .inspect_err(|err| {
                metrics::inc_upstream_outcome("transport_error");
                tracing::warn!(%submission_id, error = %err, "submission not relayed");
            })?;

    info!(
        %submission_id,
        upstream_status = outcome.status.as_u16(),
        "submission relayed"
    );
    Ok((outcome.status, Json(outcome.body)).into_response())
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> CertidaoError {
    CertidaoError::MethodNotAllowed
}

async fn healthz() -> Json<JsonValue> {
    Json(json!({"ok": true}))
}

async fn render_metrics() -> Response {
    certidao_common::metrics::render_metrics()
}

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,OPTIONS,POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

/// Pulls `certidao` out of the request body. Anything that is not a JSON
/// object, or whose `certidao` is missing or falsy, counts as no payload.
fn extract_certidao(body: &[u8]) -> Option<JsonValue> {
    let JsonValue::Object(mut fields) = serde_json::from_slice::<JsonValue>(body).ok()? else {
        return None;
    };
    fields.remove("certidao").filter(is_truthy)
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
