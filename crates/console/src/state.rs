use crate::client::CertidaoClient;
use crate::view::{FormView, ListView};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub client: CertidaoClient,
    pub form: Arc<RwLock<FormView>>,
    pub list: Arc<RwLock<ListView>>,
    pub banner_ttl: Duration,
}

impl AppState {
    pub fn new(client: CertidaoClient, banner_ttl: Duration) -> Self {
        Self {
            client,
            form: Arc::new(RwLock::new(FormView::default())),
            list: Arc::new(RwLock::new(ListView::default())),
            banner_ttl,
        }
    }
}
