use crate::metrics;
use axum::http::StatusCode;
use certidao_common::error::Result;
use certidao_common::models::SubmitEnvelope;
use reqwest::Client;
use serde_json::{Value as JsonValue, json};

#[derive(Debug)]
pub struct ForwardOutcome {
    pub status: StatusCode,
    pub body: JsonValue,
}

/// Posts `{ "certidao": ... }` to the sheet script and hands back its status
/// and a JSON body, whatever the script actually answered.
pub async fn forward_submission(
    client: &Client,
    url: &str,
    certidao: &JsonValue,
) -> Result<ForwardOutcome> {
    let response = client
        .post(url)
        .json(&SubmitEnvelope { certidao })
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    let body = decode_body(&text);

    Ok(ForwardOutcome { status, body })
}

fn decode_body(text: &str) -> JsonValue {
    match serde_json::from_str::<JsonValue>(text) {
        Ok(body) => {
            metrics::inc_upstream_outcome("json");
            body
        }
        Err(_) => {
            metrics::inc_upstream_outcome("non_json");
            json!({"ok": false, "raw": text})
        }
    }
}
