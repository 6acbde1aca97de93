use crate::metrics;
use crate::render::{self, Tab};
use crate::state::AppState;
use axum::Form;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect, Response};
use axum::routing::{get, post};
use certidao_common::metrics::metrics_middleware;
use chrono::Datelike;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Instant;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(index))
        .route("/cadastro", post(submit_form))
        .route("/consulta", get(open_list))
        .route("/consulta/refresh", post(refresh_list))
        .route("/metrics", get(render_metrics))
        .route_layer(axum::middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    tab: Option<String>,
}

async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let tab = Tab::from_query(query.tab.as_deref());

    // Reloads of the list page must not start another fetch each time.
    if tab == Tab::Consulta && !state.list.read().await.has_started() {
        let _ = start_fetch(&state).await;
    }

    let form = state.form.read().await;
    let list = state.list.read().await;
    let year = chrono::Local::now().year();
    Html(render::page(tab, &form, &list, Instant::now(), year))
}

async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Redirect {
    let record = {
        let mut form = state.form.write().await;
        if form.is_submitting() {
            info!("submission already in flight");
            return Redirect::to("/?tab=cadastro");
        }
        for (name, value) in fields {
            if !form.update(&name, value) {
                warn!(field = %name, "ignoring unknown form field");
            }
        }
        let missing = form.values().missing_fields();
        if !missing.is_empty() {
            info!(?missing, "submission blocked by empty fields");
            form.reject_incomplete();
            return Redirect::to("/?tab=cadastro");
        }
        match form.begin_submit() {
            Some(record) => record,
            None => return Redirect::to("/?tab=cadastro"),
        }
    };

    let outcome = state.client.submit(&record).await;
    metrics::record_outcome("submit", outcome.is_ok());

    let mut form = state.form.write().await;
    match outcome {
        Ok(_) => {
            info!(empresa = %record.empresa, "certidao submitted");
            form.submit_succeeded(Instant::now(), state.banner_ttl);
        }
        Err(err) => {
            warn!(error = %err, "certidao submission failed");
            form.submit_failed();
        }
    }
    Redirect::to("/?tab=cadastro")
}

async fn open_list(State(state): State<AppState>) -> Redirect {
    let _ = start_fetch(&state).await;
    Redirect::to("/?tab=consulta")
}

async fn refresh_list(State(state): State<AppState>) -> Redirect {
    let _ = start_fetch(&state).await;
    Redirect::to("/?tab=consulta")
}

async fn render_metrics() -> Response {
    certidao_common::metrics::render_metrics()
}

/// Marks the list as loading and loads it in the background. Concurrent
/// refreshes are allowed; only the newest one is applied.
pub async fn start_fetch(state: &AppState) -> JoinHandle<()> {
    let ticket = state.list.write().await.begin_fetch();
    let state = state.clone();
    tokio::spawn(async move {
        let result = state.client.fetch_records().await;
        metrics::record_outcome("list", result.is_ok());
        if !state.list.write().await.complete(ticket, result) {
            info!("discarding superseded list fetch");
        }
    })
}
