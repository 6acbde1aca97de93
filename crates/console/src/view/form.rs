use certidao_common::models::CertidaoRecord;
use std::time::{Duration, Instant};

pub const SUCCESS_MESSAGE: &str = "Certidão cadastrada com sucesso!";
pub const FAILURE_MESSAGE: &str = "Falha ao conectar com o servidor. Tente novamente.";
pub const INCOMPLETE_MESSAGE: &str = "Preencha todos os campos obrigatórios.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success {
        message: &'static str,
        expires_at: Instant,
    },
    Error {
        message: &'static str,
    },
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success { message, .. } | Self::Error { message } => *message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Time left before a success banner disappears; error banners stay.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self {
            Self::Success { expires_at, .. } => Some(expires_at.saturating_duration_since(now)),
            Self::Error { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FormView {
    values: CertidaoRecord,
    submitting: bool,
    banner: Option<Banner>,
}

impl FormView {
    pub fn values(&self) -> &CertidaoRecord {
        &self.values
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn update(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.values.set_field(name, value)
    }

    /// Starts a submission and hands back the record to send. Returns `None`
    /// while another submission is still in flight.
    pub fn begin_submit(&mut self) -> Option<CertidaoRecord> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.banner = None;
        Some(self.values.clone())
    }

    pub fn submit_succeeded(&mut self, now: Instant, banner_ttl: Duration) {
        self.submitting = false;
        self.values = CertidaoRecord::default();
        self.banner = Some(Banner::Success {
            message: SUCCESS_MESSAGE,
            expires_at: now + banner_ttl,
        });
    }

    pub fn submit_failed(&mut self) {
        self.submitting = false;
        self.banner = Some(Banner::Error {
            message: FAILURE_MESSAGE,
        });
    }

    pub fn reject_incomplete(&mut self) {
        self.banner = Some(Banner::Error {
            message: INCOMPLETE_MESSAGE,
        });
    }

    pub fn banner(&self, now: Instant) -> Option<&Banner> {
        self.banner
            .as_ref()
            .filter(|banner| banner.remaining(now).is_none_or(|left| !left.is_zero()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormView {
        let mut form = FormView::default();
        for name in CertidaoRecord::FIELDS {
            assert!(form.update(name, format!("{name}-value")));
        }
        form
    }

    #[test]
    fn success_clears_fields_and_banner_expires() {
        let mut form = filled();
        let now = Instant::now();
        assert!(form.begin_submit().is_some());
        assert!(form.is_submitting());

        form.submit_succeeded(now, Duration::from_secs(5));
        assert!(!form.is_submitting());
        assert_eq!(form.values(), &CertidaoRecord::default());

        let banner = form.banner(now + Duration::from_secs(4)).unwrap();
        assert!(banner.is_success());
        assert_eq!(banner.message(), SUCCESS_MESSAGE);
        assert!(form.banner(now + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn failure_keeps_values_and_banner_persists() {
        let mut form = filled();
        let sent = form.begin_submit().unwrap();
        form.submit_failed();

        assert_eq!(form.values(), &sent);
        let later = Instant::now() + Duration::from_secs(3600);
        assert_eq!(form.banner(later).unwrap().message(), FAILURE_MESSAGE);
    }

    #[test]
    fn second_submit_is_refused_while_in_flight() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn new_submit_clears_previous_banner() {
        let mut form = filled();
        form.begin_submit();
        form.submit_failed();
        form.begin_submit();
        assert!(form.banner(Instant::now()).is_none());
    }
}
