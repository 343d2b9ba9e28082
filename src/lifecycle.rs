//! Fetch state machine shared by the gap scanner and the intraday movers view.
//!
//! A request is issued with [`ResultLifecycle::begin`], which hands out a
//! [`Ticket`] carrying a sequence number. Only the response whose ticket matches
//! the most recently issued sequence is applied; an older request that completes
//! late is discarded, whatever order the responses arrive in.
//!
//! While a request is in flight the previous rows stay readable (stale while
//! revalidating). A failure clears them.

use crate::api::Envelope;
use crate::error::{ApiError, FailureMessages};
use crate::model::intraday::MoversMeta;
use crate::model::page::{total_pages_for, ResultPage};
use crate::model::scan::ScanMeta;
use crate::query::{Paging, SortState};

/// Totals a response metadata block exposes to the lifecycle.
pub trait PageMeta {
    fn total(&self) -> u64;

    /// `None` when the service did not report a usable page count.
    fn total_pages(&self) -> Option<u32>;

    fn page(&self) -> Option<u32> {
        None
    }
}

impl PageMeta for ScanMeta {
    fn total(&self) -> u64 {
        self.total
    }

    fn total_pages(&self) -> Option<u32> {
        (self.total_pages > 0).then_some(self.total_pages)
    }
}

impl PageMeta for MoversMeta {
    fn total(&self) -> u64 {
        self.total
    }

    fn total_pages(&self) -> Option<u32> {
        (self.total_pages > 0).then_some(self.total_pages)
    }

    fn page(&self) -> Option<u32> {
        (self.page > 0).then_some(self.page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identity and request-time paging/sort of one dispatched read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub page: u32,
    pub limit: u32,
    pub sort: SortState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Superseded,
}

/// Response parts that were missing on the wire and replaced with defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Defaulted {
    pub data: bool,
    pub meta: bool,
}

impl Defaulted {
    pub fn any(&self) -> bool {
        self.data || self.meta
    }
}

/// What the view should render for this lifecycle right now.
#[derive(Debug, PartialEq)]
pub enum ResultView<'a, T> {
    Idle,
    Loading { stale: &'a [T] },
    /// Successful response with no rows: suggest relaxing filters, no retry.
    Empty,
    Rows(&'a [T]),
    /// Transport failure: show the message with a retry affordance.
    Failed(&'a str),
}

#[derive(Debug, Clone)]
pub struct ResultLifecycle<T, M> {
    phase: Phase,
    results: Vec<T>,
    total: u64,
    page: u32,
    total_pages: u32,
    meta: Option<M>,
    sorted_by: Option<SortState>,
    error: Option<String>,
    defaulted: Defaulted,
    issued: u64,
    messages: FailureMessages,
}

impl<T, M: PageMeta> ResultLifecycle<T, M> {
    pub fn new(messages: FailureMessages) -> Self {
        Self {
            phase: Phase::Idle,
            results: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 0,
            meta: None,
            sorted_by: None,
            error: None,
            defaulted: Defaulted::default(),
            issued: 0,
            messages,
        }
    }

    /// Enter `Loading` for a new request. A second `begin` while loading stays in
    /// `Loading` and simply supersedes the first ticket.
    pub fn begin(&mut self, paging: &Paging, sort: &SortState) -> Ticket {
        self.issued += 1;
        self.phase = Phase::Loading;
        self.error = None;
        let ticket = Ticket {
            seq: self.issued,
            page: paging.page(),
            limit: paging.limit(),
            sort: sort.clone(),
        };
        tracing::debug!(
            seq = ticket.seq,
            page = ticket.page,
            sort = %ticket.sort.key,
            sort_dir = %ticket.sort.dir,
            "request issued"
        );
        ticket
    }

    pub fn resolve(
        &mut self,
        ticket: &Ticket,
        outcome: Result<Envelope<T, M>, ApiError>,
    ) -> Resolution {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                "discarding superseded response"
            );
            return Resolution::Superseded;
        }

        match outcome {
            Ok(envelope) => self.apply_success(ticket, envelope),
            Err(err) => self.apply_failure(&err),
        }
        Resolution::Applied
    }

    fn apply_success(&mut self, ticket: &Ticket, envelope: Envelope<T, M>) {
        self.defaulted = Defaulted {
            data: envelope.data.is_none(),
            meta: envelope.meta.is_none(),
        };
        if self.defaulted.any() {
            tracing::debug!(
                seq = ticket.seq,
                missing_data = self.defaulted.data,
                missing_meta = self.defaulted.meta,
                "response missing fields, using defaults"
            );
        }

        self.results = envelope.data.unwrap_or_default();
        self.total = envelope.meta.as_ref().map(PageMeta::total).unwrap_or(0);
        self.total_pages = envelope
            .meta
            .as_ref()
            .and_then(PageMeta::total_pages)
            .unwrap_or_else(|| total_pages_for(self.total, ticket.limit));
        self.page = envelope
            .meta
            .as_ref()
            .and_then(PageMeta::page)
            .unwrap_or(ticket.page);
        self.meta = envelope.meta;
        self.sorted_by = Some(ticket.sort.clone());
        self.error = None;
        self.phase = Phase::Ready;
    }

    fn apply_failure(&mut self, err: &ApiError) {
        let message = self.messages.describe(err);
        tracing::warn!(error = %err, message = %message, "request failed");
        self.results.clear();
        self.total = 0;
        self.total_pages = 0;
        self.meta = None;
        self.defaulted = Defaulted::default();
        self.error = Some(message);
        self.phase = Phase::Failed;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn meta(&self) -> Option<&M> {
        self.meta.as_ref()
    }

    /// Sort the currently shown rows were requested with.
    pub fn sorted_by(&self) -> Option<&SortState> {
        self.sorted_by.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn defaulted(&self) -> Defaulted {
        self.defaulted
    }

    pub fn view(&self) -> ResultView<'_, T> {
        match self.phase {
            Phase::Idle => ResultView::Idle,
            Phase::Loading => ResultView::Loading {
                stale: &self.results,
            },
            Phase::Failed => {
                ResultView::Failed(self.error.as_deref().unwrap_or(self.messages.generic))
            }
            Phase::Ready if self.results.is_empty() => ResultView::Empty,
            Phase::Ready => ResultView::Rows(&self.results),
        }
    }
}

impl<T: Clone, M: PageMeta> ResultLifecycle<T, M> {
    pub fn snapshot(&self) -> ResultPage<T> {
        ResultPage {
            items: self.results.clone(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}
