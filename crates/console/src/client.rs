use certidao_common::error::{CertidaoError, Result};
use certidao_common::listing::ListPayload;
use certidao_common::models::{CertidaoRecord, RelayReply, SubmitEnvelope};
use reqwest::Client;
use reqwest::redirect::Policy;
use std::sync::Arc;

/// Talks to the relay for writes and straight to the sheet script for reads.
#[derive(Clone)]
pub struct CertidaoClient {
    http: Client,
    relay_url: Arc<str>,
    read_url: Arc<str>,
}

impl CertidaoClient {
    pub fn new(relay_url: impl Into<Arc<str>>, read_url: impl Into<Arc<str>>) -> Result<Self> {
        // The script host answers reads with a redirect to the actual content.
        let http = Client::builder().redirect(Policy::limited(10)).build()?;
        Ok(Self {
            http,
            relay_url: relay_url.into(),
            read_url: read_url.into(),
        })
    }

    pub async fn submit(&self, record: &CertidaoRecord) -> Result<RelayReply> {
        let response = self
            .http
            .post(&*self.relay_url)
            .json(&SubmitEnvelope { certidao: record })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CertidaoError::UpstreamStatus(status.as_u16()));
        }

        let reply: RelayReply = response.json().await?;
        if !reply.ok {
            return Err(CertidaoError::rejected(reply.failure_reason()));
        }
        Ok(reply)
    }

    pub async fn fetch_records(&self) -> Result<Vec<CertidaoRecord>> {
        let response = self.http.get(&*self.read_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CertidaoError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload = ListPayload::parse(&body)?;
        Ok(payload.into_records())
    }
}
