use crate::api::{MarketApi, ScanResponse};
use crate::config::ScannerConfig;
use crate::error::{ApiError, FilterError, SCANNER_MESSAGES};
use crate::lifecycle::{ResultLifecycle, Resolution, Ticket};
use crate::model::filter::{Bound, CloseDirection, DayGroup, Metric, ScannerFilters};
use crate::model::scan::{DateWindow, ScanMeta, ScanResult};
use crate::query::{Paging, ParamMap, ScanQuery, SortState};

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub ticket: Ticket,
    pub params: ParamMap,
}

/// Gap scanner surface: per-day filter edits, paging, sort and the scan lifecycle.
///
/// Edits never fetch on their own; the caller decides when to [`scan`](Self::scan).
#[derive(Debug, Clone)]
pub struct ScannerController {
    query: ScanQuery,
    lifecycle: ResultLifecycle<ScanResult, ScanMeta>,
}

impl Default for ScannerController {
    fn default() -> Self {
        Self::new(ScanQuery::default())
    }
}

impl ScannerController {
    pub fn new(query: ScanQuery) -> Self {
        Self {
            query,
            lifecycle: ResultLifecycle::new(SCANNER_MESSAGES),
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(ScanQuery {
            paging: Paging::new(config.page_limit),
            sort: SortState::new(config.default_sort.clone()),
            ..ScanQuery::default()
        })
    }

    pub fn query(&self) -> &ScanQuery {
        &self.query
    }

    pub fn filters(&self) -> &ScannerFilters {
        &self.query.filters
    }

    pub fn lifecycle(&self) -> &ResultLifecycle<ScanResult, ScanMeta> {
        &self.lifecycle
    }

    /// Business days covered by the last applied scan.
    pub fn scanned_dates(&self) -> &[String] {
        self.lifecycle
            .meta()
            .map(|m| m.scanned_dates.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_bound(
        &mut self,
        group: DayGroup,
        metric: Metric,
        bound: Bound,
        value: impl Into<String>,
    ) {
        self.query.filters.set_bound(group, metric, bound, value);
    }

    pub fn set_bound_by_name(
        &mut self,
        group: &str,
        metric: &str,
        bound: &str,
        value: impl Into<String>,
    ) -> Result<(), FilterError> {
        self.query
            .filters
            .set_bound_by_name(group, metric, bound, value)
    }

    pub fn set_close_direction(&mut self, group: DayGroup, direction: CloseDirection) {
        self.query.filters.set_close_direction(group, direction);
    }

    pub fn set_date_window(&mut self, window: DateWindow) {
        self.query.date_window = window;
    }

    pub fn count_active(&self) -> usize {
        self.query.filters.count_active()
    }

    pub fn count_active_in(&self, group: DayGroup) -> usize {
        self.query.filters.group(group).count_active()
    }

    /// Clear every group and the date window, back to page 1. Does not fetch.
    pub fn reset_filters(&mut self) {
        self.query.filters = ScannerFilters::default();
        self.query.date_window = DateWindow::default();
        self.query.paging.reset();
    }

    /// Returns `true` only when the page actually changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        self.query.paging.set_page(page)
    }

    pub fn page(&self) -> u32 {
        self.query.paging.page()
    }

    pub fn set_sort(&mut self, key: &str) {
        self.query.sort.toggle(key);
    }

    pub fn sort(&self) -> &SortState {
        &self.query.sort
    }

    pub fn compose(&self) -> ParamMap {
        self.query.compose()
    }

    pub fn begin_scan(&mut self) -> ScanRequest {
        let params = self.query.compose();
        let ticket = self.lifecycle.begin(&self.query.paging, &self.query.sort);
        ScanRequest { ticket, params }
    }

    pub fn apply_scan(
        &mut self,
        ticket: &Ticket,
        outcome: Result<ScanResponse, ApiError>,
    ) -> Resolution {
        self.lifecycle.resolve(ticket, outcome)
    }

    pub async fn scan<A: MarketApi + ?Sized>(&mut self, api: &A) -> Resolution {
        let request = self.begin_scan();
        let outcome = api.scan(request.params).await;
        self.apply_scan(&request.ticket, outcome)
    }
}
