use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub script_write_url: Arc<str>,
}

impl AppState {
    pub fn new(client: Client, script_write_url: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            script_write_url: script_write_url.into(),
        }
    }
}
