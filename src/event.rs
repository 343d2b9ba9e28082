use crate::api::{MoversResponse, ScanResponse};
use crate::error::ApiError;
use crate::expansion::ChartTicket;
use crate::lifecycle::Ticket;
use crate::model::bar::ChartResponse;

/// Completion of a request dispatched by the desk, carrying the ticket it was
/// issued under so stale completions can be told apart.
#[derive(Debug, Clone)]
pub enum DeskEvent {
    ScanCompleted {
        ticket: Ticket,
        outcome: Result<ScanResponse, ApiError>,
    },
    MoversCompleted {
        ticket: Ticket,
        outcome: Result<MoversResponse, ApiError>,
    },
    ChartCompleted {
        ticket: ChartTicket,
        outcome: Result<ChartResponse, ApiError>,
    },
}

impl DeskEvent {
    pub fn is_ok(&self) -> bool {
        match self {
            Self::ScanCompleted { outcome, .. } => outcome.is_ok(),
            Self::MoversCompleted { outcome, .. } => outcome.is_ok(),
            Self::ChartCompleted { outcome, .. } => outcome.is_ok(),
        }
    }
}
