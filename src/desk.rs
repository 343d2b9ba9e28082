use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::MarketApi;
use crate::config::Config;
use crate::event::DeskEvent;
use crate::intraday::IntradayController;
use crate::lifecycle::{Resolution, Ticket};
use crate::scanner::ScannerController;

/// Both search surfaces wired to one market service.
///
/// `dispatch_*` runs the request on a tokio task and returns at once; the
/// completion comes back as a [`DeskEvent`] on the receiver handed out by
/// [`Desk::new`] and is routed with [`Desk::apply`]. Completions may arrive in
/// any order; the controllers discard the ones that are no longer latest.
pub struct Desk {
    pub scanner: ScannerController,
    pub intraday: IntradayController,
    api: Arc<dyn MarketApi>,
    events: mpsc::UnboundedSender<DeskEvent>,
}

impl Desk {
    pub fn new(
        api: Arc<dyn MarketApi>,
        scanner: ScannerController,
        intraday: IntradayController,
    ) -> (Self, mpsc::UnboundedReceiver<DeskEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                scanner,
                intraday,
                api,
                events,
            },
            rx,
        )
    }

    pub fn from_config(
        api: Arc<dyn MarketApi>,
        config: &Config,
    ) -> (Self, mpsc::UnboundedReceiver<DeskEvent>) {
        Self::new(
            api,
            ScannerController::from_config(&config.scanner),
            IntradayController::from_config(&config.intraday),
        )
    }

    pub fn dispatch_scan(&mut self) -> Ticket {
        let request = self.scanner.begin_scan();
        let ticket = request.ticket.clone();
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = api.scan(request.params).await;
            let _ = tx.send(DeskEvent::ScanCompleted {
                ticket: request.ticket,
                outcome,
            });
        });
        ticket
    }

    pub fn dispatch_movers(&mut self) -> Ticket {
        let request = self.intraday.begin_search();
        let ticket = request.ticket.clone();
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = api.intraday_movers(request.params).await;
            let _ = tx.send(DeskEvent::MoversCompleted {
                ticket: request.ticket,
                outcome,
            });
        });
        ticket
    }

    /// Move the scanner to `page`, fetching only if the page changed.
    pub fn set_scan_page(&mut self, page: u32) -> Option<Ticket> {
        if !self.scanner.set_page(page) {
            return None;
        }
        Some(self.dispatch_scan())
    }

    pub fn set_movers_page(&mut self, page: u32) -> Option<Ticket> {
        if !self.intraday.set_page(page) {
            return None;
        }
        Some(self.dispatch_movers())
    }

    /// Toggle the scanner sort key and refetch.
    pub fn sort_scan(&mut self, key: &str) -> Ticket {
        self.scanner.set_sort(key);
        self.dispatch_scan()
    }

    pub fn sort_movers(&mut self, key: &str) -> Ticket {
        self.intraday.set_sort(key);
        self.dispatch_movers()
    }

    /// Toggle the detail chart for `ticker`. Returns `true` when a load was issued.
    pub fn toggle_expanded(&mut self, ticker: &str) -> bool {
        let Some(request) = self.intraday.set_expanded(ticker) else {
            return false;
        };
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = api
                .intraday_chart(request.ticket.ticker.clone(), request.params)
                .await;
            let _ = tx.send(DeskEvent::ChartCompleted {
                ticket: request.ticket,
                outcome,
            });
        });
        true
    }

    pub fn apply(&mut self, event: DeskEvent) -> Resolution {
        match event {
            DeskEvent::ScanCompleted { ticket, outcome } => {
                self.scanner.apply_scan(&ticket, outcome)
            }
            DeskEvent::MoversCompleted { ticket, outcome } => {
                self.intraday.apply_search(&ticket, outcome)
            }
            DeskEvent::ChartCompleted { ticket, outcome } => {
                self.intraday.apply_chart(&ticket, outcome)
            }
        }
    }
}
