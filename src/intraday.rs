use crate::api::{MarketApi, MoversResponse};
use crate::config::IntradayConfig;
use crate::error::{ApiError, INTRADAY_MESSAGES};
use crate::expansion::{ChartRequest, ChartTicket, ExpansionController};
use crate::lifecycle::{ResultLifecycle, Resolution, Ticket};
use crate::model::bar::ChartResponse;
use crate::model::intraday::{
    ClockTime, Direction, IntradayFilters, IntradayMover, MoversMeta, TimePreset, Timespan,
};
use crate::query::{IntradayQuery, Paging, ParamMap, SortState};

#[derive(Debug, Clone, PartialEq)]
pub struct MoversRequest {
    pub ticket: Ticket,
    pub params: ParamMap,
}

/// Intraday movers surface: time-window filters, paging, sort, the movers
/// lifecycle and the expanded detail chart.
///
/// Any edit that moves the chart window (date, times, bar size) collapses the
/// expanded row so bars from the old window are never shown.
#[derive(Debug, Clone)]
pub struct IntradayController {
    query: IntradayQuery,
    baseline: IntradayFilters,
    lifecycle: ResultLifecycle<IntradayMover, MoversMeta>,
    expansion: ExpansionController,
}

impl Default for IntradayController {
    fn default() -> Self {
        Self::new(IntradayFilters::default())
    }
}

impl IntradayController {
    /// `baseline` is both the initial filter state and what `reset_filters` restores.
    pub fn new(baseline: IntradayFilters) -> Self {
        Self {
            query: IntradayQuery::new(baseline.clone()),
            baseline,
            lifecycle: ResultLifecycle::new(INTRADAY_MESSAGES),
            expansion: ExpansionController::new(),
        }
    }

    pub fn from_config(config: &IntradayConfig) -> Self {
        let mut controller = Self::default();
        controller.query.paging = Paging::new(config.page_limit);
        controller.query.sort = SortState::new(config.default_sort.clone());
        controller
    }

    pub fn query(&self) -> &IntradayQuery {
        &self.query
    }

    pub fn filters(&self) -> &IntradayFilters {
        &self.query.filters
    }

    pub fn lifecycle(&self) -> &ResultLifecycle<IntradayMover, MoversMeta> {
        &self.lifecycle
    }

    pub fn expansion(&self) -> &ExpansionController {
        &self.expansion
    }

    /// Apply an arbitrary filter edit. Collapses the expanded row when the edit
    /// changed the chart window.
    pub fn edit_filters(&mut self, edit: impl FnOnce(&mut IntradayFilters)) {
        let before = self.query.filters.chart_window();
        edit(&mut self.query.filters);
        if self.query.filters.chart_window() != before {
            self.expansion.invalidate();
        }
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        let date = date.into();
        self.edit_filters(|f| f.date = date);
    }

    pub fn set_from(&mut self, from: ClockTime) {
        self.edit_filters(|f| f.from = from);
    }

    pub fn set_to(&mut self, to: ClockTime) {
        self.edit_filters(|f| f.to = to);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.edit_filters(|f| f.direction = direction);
    }

    pub fn set_min_change(&mut self, min_change: f64) {
        self.edit_filters(|f| f.min_change = min_change);
    }

    pub fn set_timespan(&mut self, timespan: Timespan) {
        self.edit_filters(|f| f.timespan = timespan);
    }

    pub fn set_multiplier(&mut self, multiplier: u32) {
        self.edit_filters(|f| f.multiplier = multiplier);
    }

    pub fn apply_preset(&mut self, preset: &TimePreset) {
        self.edit_filters(|f| f.apply_preset(preset));
    }

    /// Restore the baseline filters and page 1. Does not fetch.
    pub fn reset_filters(&mut self) {
        let baseline = self.baseline.clone();
        self.edit_filters(|f| *f = baseline);
        self.query.paging.reset();
    }

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

    pub fn begin_search(&mut self) -> MoversRequest {
        let params = self.query.compose();
        let ticket = self.lifecycle.begin(&self.query.paging, &self.query.sort);
        MoversRequest { ticket, params }
    }

    pub fn apply_search(
        &mut self,
        ticket: &Ticket,
        outcome: Result<MoversResponse, ApiError>,
    ) -> Resolution {
        self.lifecycle.resolve(ticket, outcome)
    }

    pub async fn search<A: MarketApi + ?Sized>(&mut self, api: &A) -> Resolution {
        let request = self.begin_search();
        let outcome = api.intraday_movers(request.params).await;
        self.apply_search(&request.ticket, outcome)
    }

    /// Toggle the detail chart of `ticker` against the current window.
    pub fn set_expanded(&mut self, ticker: &str) -> Option<ChartRequest> {
        let window = self.query.filters.chart_window();
        self.expansion.set_expanded(ticker, &window)
    }

    pub fn collapse(&mut self) {
        self.expansion.collapse();
    }

    pub fn apply_chart(
        &mut self,
        ticket: &ChartTicket,
        outcome: Result<ChartResponse, ApiError>,
    ) -> Resolution {
        if ticket.window != self.query.filters.chart_window() {
            return Resolution::Superseded;
        }
        self.expansion.resolve(ticket, outcome)
    }

    /// Toggle `ticker` and, when it opened, load its chart.
    pub async fn toggle_expanded<A: MarketApi + ?Sized>(
        &mut self,
        api: &A,
        ticker: &str,
    ) -> Option<Resolution> {
        let request = self.set_expanded(ticker)?;
        let outcome = api
            .intraday_chart(request.ticket.ticker.clone(), request.params)
            .await;
        Some(self.apply_chart(&request.ticket, outcome))
    }
}
