use crate::error::ApiError;
use crate::lifecycle::Resolution;
use crate::model::bar::{ChartBar, ChartResponse};
use crate::model::intraday::ChartWindow;
use crate::query::{chart_params, ParamMap};

/// Identity of one detail-chart load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTicket {
    pub seq: u64,
    pub ticker: String,
    pub window: ChartWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub ticket: ChartTicket,
    pub params: ParamMap,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpansionView<'a> {
    Collapsed,
    Loading,
    /// The load finished without bars (empty payload or failed request).
    NoData,
    Bars(&'a [ChartBar]),
}

/// At most one expanded row with its chart bars. Selecting a new row discards
/// the previous bars; nothing is cached across rows or filter windows.
#[derive(Debug, Clone, Default)]
pub struct ExpansionController {
    active: Option<String>,
    data: Option<Vec<ChartBar>>,
    loading: bool,
    issued: u64,
    missing_bars: bool,
}

impl ExpansionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `key`: the active row collapses, any other row becomes active and
    /// gets a load request for `window`.
    pub fn set_expanded(&mut self, key: &str, window: &ChartWindow) -> Option<ChartRequest> {
        if self.active.as_deref() == Some(key) {
            self.collapse();
            return None;
        }
        Some(self.load(key, window))
    }

    /// Start (or restart) loading bars for `key` over `window`.
    pub fn load(&mut self, key: &str, window: &ChartWindow) -> ChartRequest {
        self.issued += 1;
        self.active = Some(key.to_string());
        self.data = None;
        self.loading = true;
        self.missing_bars = false;
        tracing::debug!(seq = self.issued, ticker = key, "chart load issued");
        ChartRequest {
            ticket: ChartTicket {
                seq: self.issued,
                ticker: key.to_string(),
                window: window.clone(),
            },
            params: chart_params(window),
        }
    }

    pub fn collapse(&mut self) {
        self.issued += 1;
        self.active = None;
        self.data = None;
        self.loading = false;
        self.missing_bars = false;
    }

    /// The primary filter window changed: bars fetched for the old window are
    /// stale, so the row collapses. Returns whether a row was open.
    pub fn invalidate(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        tracing::debug!(ticker = ?self.active, "filter window changed, collapsing chart");
        self.collapse();
        true
    }

    pub fn resolve(
        &mut self,
        ticket: &ChartTicket,
        outcome: Result<ChartResponse, ApiError>,
    ) -> Resolution {
        if ticket.seq != self.issued || self.active.as_deref() != Some(ticket.ticker.as_str()) {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                ticker = %ticket.ticker,
                "discarding superseded chart response"
            );
            return Resolution::Superseded;
        }

        self.loading = false;
        match outcome {
            Ok(resp) => match resp.into_bars() {
                Some(bars) => self.data = Some(bars),
                None => {
                    self.missing_bars = true;
                    self.data = Some(Vec::new());
                }
            },
            Err(err) => {
                tracing::warn!(
                    ticker = %ticket.ticker,
                    error = %err,
                    "failed to load intraday chart"
                );
                self.data = Some(Vec::new());
            }
        }
        Resolution::Applied
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn data(&self) -> Option<&[ChartBar]> {
        self.data.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.active.as_deref() == Some(key)
    }

    /// Whether the last applied response lacked a bar list entirely.
    pub fn bars_were_missing(&self) -> bool {
        self.missing_bars
    }

    pub fn view(&self) -> ExpansionView<'_> {
        if self.active.is_none() {
            return ExpansionView::Collapsed;
        }
        if self.loading {
            return ExpansionView::Loading;
        }
        match self.data.as_deref() {
            Some(bars) if !bars.is_empty() => ExpansionView::Bars(bars),
            Some(_) => ExpansionView::NoData,
            None => ExpansionView::Loading,
        }
    }
}
