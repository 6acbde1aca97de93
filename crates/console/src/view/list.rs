use certidao_common::error::CertidaoError;
use certidao_common::models::CertidaoRecord;

pub const LOAD_ERROR_MESSAGE: &str =
    "Não foi possível carregar a lista de certidões. Verifique sua conexão.";

/// Issued by [`ListView::begin_fetch`]; only the newest ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, PartialEq, Eq)]
pub enum ListPhase<'a> {
    Loading,
    Failed(&'static str),
    Empty,
    Rows(&'a [CertidaoRecord]),
}

#[derive(Debug, Default)]
pub struct ListView {
    records: Vec<CertidaoRecord>,
    loading: bool,
    error: Option<&'static str>,
    issued: u64,
}

impl ListView {
    pub fn has_started(&self) -> bool {
        self.issued > 0
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[CertidaoRecord] {
        &self.records
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.issued)
    }

    /// Applies a finished fetch. Returns false when a newer fetch has been
    /// issued since `ticket`, in which case the result is dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<CertidaoRecord>, CertidaoError>,
    ) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load certidoes");
                self.error = Some(LOAD_ERROR_MESSAGE);
            }
        }
        true
    }

    pub fn phase(&self) -> ListPhase<'_> {
        if self.loading && self.records.is_empty() {
            return ListPhase::Loading;
        }
        if let Some(message) = self.error {
            return ListPhase::Failed(message);
        }
        if self.records.is_empty() {
            ListPhase::Empty
        } else {
            ListPhase::Rows(&self.records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CertidaoRecord {
        CertidaoRecord {
            empresa: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn first_fetch_shows_loading() {
        let mut view = ListView::default();
        assert!(!view.has_started());
        view.begin_fetch();
        assert_eq!(view.phase(), ListPhase::Loading);
    }

    #[test]
    fn empty_result_is_not_loading_or_error() {
        let mut view = ListView::default();
        let ticket = view.begin_fetch();
        assert!(view.complete(ticket, Ok(Vec::new())));
        assert_eq!(view.phase(), ListPhase::Empty);
    }

    #[test]
    fn refresh_with_data_keeps_rows_visible() {
        let mut view = ListView::default();
        let ticket = view.begin_fetch();
        view.complete(ticket, Ok(vec![acme()]));
        view.begin_fetch();
        assert!(view.is_loading());
        assert_eq!(view.phase(), ListPhase::Rows(&[acme()]));
    }

    #[test]
    fn failure_shows_fixed_message_and_retry_clears_it() {
        let mut view = ListView::default();
        let ticket = view.begin_fetch();
        view.complete(ticket, Err(CertidaoError::UpstreamStatus(500)));
        assert_eq!(view.phase(), ListPhase::Failed(LOAD_ERROR_MESSAGE));

        let ticket = view.begin_fetch();
        assert_eq!(view.phase(), ListPhase::Loading);
        view.complete(ticket, Ok(vec![acme()]));
        assert_eq!(view.phase(), ListPhase::Rows(&[acme()]));
    }

    #[test]
    fn superseded_fetch_is_discarded() {
        let mut view = ListView::default();
        let stale = view.begin_fetch();
        let fresh = view.begin_fetch();

        assert!(view.complete(fresh, Ok(vec![acme()])));
        assert!(!view.complete(stale, Ok(Vec::new())));
        assert_eq!(view.records().len(), 1);
        assert!(!view.is_loading());
    }
}
