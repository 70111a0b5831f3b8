//! Simulation result browsing

use super::Source;
use crate::api::Backend;
use crate::domain::{fixtures, TestDetail, TestId, TestSummary};

/// List of past simulation runs with an optional opened report
pub struct ResultsView<'a> {
    backend: &'a dyn Backend,
    summaries: Vec<TestSummary>,
    detail: Option<TestDetail>,
    source: Source,
}

impl<'a> ResultsView<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            summaries: Vec::new(),
            detail: None,
            source: Source::Live,
        }
    }

    pub fn summaries(&self) -> &[TestSummary] {
        &self.summaries
    }

    pub fn detail(&self) -> Option<&TestDetail> {
        self.detail.as_ref()
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Loads the run list. An error or an empty answer shows the demo runs.
    pub fn fetch_summaries(&mut self) -> Source {
        let (summaries, source) = match self.backend.test_results() {
            Ok(list) if !list.is_empty() => (list, Source::Live),
            Ok(_) => {
                tracing::info!("no simulation results yet, using demo data");
                (fixtures::test_summaries(), Source::Fixture)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch simulation results, using demo data");
                (fixtures::test_summaries(), Source::Fixture)
            }
        };

        self.summaries = summaries;
        self.source = source;
        source
    }

    /// Opens the report of one run
    pub fn open(&mut self, test_id: TestId) -> Source {
        let (detail, source) = match self.backend.test_result(test_id) {
            Ok(detail) => (detail, Source::Live),
            Err(e) => {
                tracing::warn!(test_id, error = %e, "failed to fetch simulation detail, using demo data");
                (fixtures::test_detail(test_id), Source::Fixture)
            }
        };

        self.detail = Some(detail);
        source
    }

    /// Returns to the list
    pub fn close(&mut self) {
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::FakeBackend;

    #[test]
    fn empty_list_uses_demo_runs() {
        let backend = FakeBackend::new();
        let mut view = ResultsView::new(&backend);

        assert_eq!(view.fetch_summaries(), Source::Fixture);
        assert_eq!(view.summaries().len(), fixtures::test_summaries().len());
    }

    #[test]
    fn live_list_is_kept() {
        let backend = FakeBackend::new();
        let mut live = fixtures::test_summaries();
        live.truncate(1);
        live[0].test_id = 42;
        backend.summaries.replace(live);

        let mut view = ResultsView::new(&backend);
        assert_eq!(view.fetch_summaries(), Source::Live);
        assert_eq!(view.summaries()[0].test_id, 42);
    }

    #[test]
    fn detail_fallback_keeps_requested_id() {
        let backend = FakeBackend::new();
        backend.fail_reads.set(true);
        let mut view = ResultsView::new(&backend);

        assert_eq!(view.open(7), Source::Fixture);
        assert_eq!(view.detail().map(|d| d.test_id), Some(7));

        view.close();
        assert!(view.detail().is_none());
    }

    #[test]
    fn live_detail() {
        let backend = FakeBackend::new();
        let mut view = ResultsView::new(&backend);

        assert_eq!(view.open(3), Source::Live);
        assert_eq!(view.detail().map(|d| d.bucket_name.as_str()), Some("Live bucket"));
    }
}
